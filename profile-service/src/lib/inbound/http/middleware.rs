use auth::Role;
use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified caller identity through a request.
#[derive(Debug, Clone)]
pub struct CurrentIdentity {
    pub identity_id: i64,
    pub subject: String,
    pub role: Role,
}

/// Middleware that validates the bearer token and stores the claims in
/// request extensions.
///
/// Verification is entirely local: the shared secret is the only thing
/// needed, there is no call back to identity-service.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(&req)
        .map_err(|e| ApiError::Unauthorized(e.to_string()).into_response())?;

    let claims = state.authenticator.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        ApiError::Unauthorized(e.to_string()).into_response()
    })?;

    req.extensions_mut().insert(CurrentIdentity {
        identity_id: claims.identity_id,
        subject: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Middleware rejecting callers whose token carries a non-admin role.
///
/// Runs after [`authenticate`], so a missing or invalid credential is
/// already a 401 before this check; a valid non-admin token is a 403.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    let identity = req
        .extensions()
        .get::<CurrentIdentity>()
        .cloned()
        .ok_or_else(|| {
            ApiError::Unauthorized(TokenError::Missing.to_string()).into_response()
        })?;

    if identity.role != Role::Admin {
        return Err(ApiError::Forbidden(format!(
            "Role {} may not access this resource",
            identity.role
        ))
        .into_response());
    }

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Result<&str, TokenError> {
    let value = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or(TokenError::Missing)?;

    let value = value.to_str().map_err(|_| TokenError::Malformed)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(TokenError::Missing)
}
