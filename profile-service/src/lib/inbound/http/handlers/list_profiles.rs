use axum::extract::State;
use axum::http::StatusCode;

use super::get_my_profile::ProfileData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Admin-only listing of every replica row.
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ProfileData>>, ApiError> {
    state
        .profile_service
        .list_profiles()
        .await
        .map_err(ApiError::from)
        .map(|profiles| {
            ApiSuccess::new(
                StatusCode::OK,
                profiles.iter().map(ProfileData::from).collect(),
            )
        })
}
