use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_my_profile::get_my_profile;
use super::handlers::list_profiles::list_profiles;
use super::handlers::sync_profile::sync_profile;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::profile::ports::ProfileServicePort;

#[derive(Clone)]
pub struct AppState {
    pub profile_service: Arc<dyn ProfileServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    profile_service: Arc<dyn ProfileServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        profile_service,
        authenticator,
    };

    // Reached only from inside the deployment; exposed without a token on
    // the trust of the internal network, like the upstream service's call
    let internal_routes = Router::new().route("/internal/profiles/sync", post(sync_profile));

    let protected_routes = Router::new()
        .route("/api/profiles/me", get(get_my_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/api/profiles", get(list_profiles))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(internal_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
