use auth::Role;
use auth::SessionClaims;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::bearer_token;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<VerifyResponseData>, ApiError> {
    let token = bearer_token(&headers)?;

    state
        .identity_service
        .verify(token)
        .map_err(ApiError::from)
        .map(|ref claims| ApiSuccess::new(StatusCode::OK, claims.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyResponseData {
    pub subject: String,
    pub identity_id: i64,
    pub role: Role,
    pub display_name: String,
    pub expires_at: i64,
}

impl From<&SessionClaims> for VerifyResponseData {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            subject: claims.sub.clone(),
            identity_id: claims.identity_id,
            role: claims.role,
            display_name: claims.display_name.clone(),
            expires_at: claims.exp,
        }
    }
}
