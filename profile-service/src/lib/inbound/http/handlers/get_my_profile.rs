use auth::Role;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentIdentity;
use crate::inbound::http::router::AppState;
use crate::profile::models::Profile;

/// Read the caller's own replica row, keyed by the token's identity id.
///
/// A 404 here while the identity can log in upstream means the row sits in
/// the replication gap and has not arrived yet.
pub async fn get_my_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<CurrentIdentity>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .profile_service
        .get_profile(identity.identity_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub identity_id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub synced_at: DateTime<Utc>,
}

impl From<&Profile> for ProfileData {
    fn from(profile: &Profile) -> Self {
        Self {
            identity_id: profile.identity_id,
            email: profile.email.clone(),
            display_name: profile.display_name.clone(),
            role: profile.role,
            synced_at: profile.synced_at,
        }
    }
}
