use auth::Role;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::inbound::http::router::AppState;
use crate::profile::models::SyncProfileCommand;

/// Internal sync endpoint consumed by identity-service after each
/// registration. Replies with an acknowledgement status only.
pub async fn sync_profile(
    State(state): State<AppState>,
    Json(body): Json<SyncProfileRequestBody>,
) -> Result<StatusCode, ApiError> {
    let command =
        SyncProfileCommand::new(body.identity_id, body.email, body.display_name, body.role)
            .map_err(ApiError::from)?;

    state
        .profile_service
        .sync_profile(command)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Wire shape of the replication record. Unknown fields and unknown roles
/// are rejected before anything reaches the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncProfileRequestBody {
    pub identity_id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}
