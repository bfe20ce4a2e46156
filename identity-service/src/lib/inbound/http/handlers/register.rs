use auth::Role;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::identity::errors::DisplayNameError;
use crate::identity::errors::EmailError;
use crate::identity::models::DisplayName;
use crate::identity::models::EmailAddress;
use crate::identity::models::Identity;
use crate::identity::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .identity_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::CREATED, identity.into()))
}

/// HTTP request body for registration (raw JSON).
///
/// Unknown fields are rejected at the boundary so loosely shaped input
/// never reaches the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequestBody {
    email: String,
    display_name: String,
    role: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid display name: {0}")]
    DisplayName(#[from] DisplayNameError),

    #[error("Invalid role: {0}")]
    Role(#[from] auth::InvalidRole),

    #[error("Password must not be empty")]
    EmptyPassword,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let display_name = DisplayName::new(self.display_name)?;
        let role: Role = self.role.parse()?;
        if self.password.is_empty() {
            return Err(ParseRegisterRequestError::EmptyPassword);
        }
        Ok(RegisterCommand::new(email, display_name, role, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl From<&Identity> for RegisterResponseData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.as_i64(),
            email: identity.email.as_str().to_string(),
            display_name: identity.display_name.as_str().to_string(),
            role: identity.role,
        }
    }
}
