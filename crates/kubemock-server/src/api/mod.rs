//! API module for the kubemock server

pub mod error;
pub mod handlers;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::Method,
    routing::{delete, get, post},
    Router,
};
use tower_http::{timeout::RequestBodyTimeoutLayer, trace::TraceLayer};

use kubemock::TokenReviewService;

use error::ApiError;

/// Route the token review consumer calls.
pub const TOKEN_REVIEW_PATH: &str = "/apis/authentication.k8s.io/v1/tokenreviews";
/// Test-only route to register a service account.
pub const REGISTER_PATH: &str = "/api/v1/testing/serviceaccounts";
/// Test-only route to reset the registry.
pub const RESET_PATH: &str = "/api/v1/testing/reset";
/// Liveness probe.
pub const HEALTH_PATH: &str = "/api/v1/testing/health";

/// Shared state of all handlers.
pub struct AppState {
    pub service: TokenReviewService,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            service: TokenReviewService::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Kubernetes API
        .route(
            TOKEN_REVIEW_PATH,
            post(handlers::token_review)
                .put(handlers::token_review)
                .fallback(|method: Method| async move {
                    ApiError::NotImplemented(format!(
                        "login request must be either PUT or POST but got {:?}",
                        method.as_str()
                    ))
                }),
        )
        // Testing endpoints
        .route(
            REGISTER_PATH,
            post(handlers::register_service_account).fallback(|method: Method| async move {
                ApiError::wrong_method("service account registration handler", "POST", &method)
            }),
        )
        .route(
            RESET_PATH,
            delete(handlers::reset).fallback(|method: Method| async move {
                ApiError::wrong_method("reset handler", "DELETE", &method)
            }),
        )
        .route(
            HEALTH_PATH,
            get(handlers::health)
                // `get` also routes HEAD; the probe only answers GET.
                .head(|| async {
                    ApiError::wrong_method("health handler", "GET", &Method::HEAD)
                })
                .fallback(|method: Method| async move {
                    ApiError::wrong_method("health handler", "GET", &method)
                }),
        )
        .fallback(handlers::unimplemented)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the router served by the binary.
///
/// Only reading the request body is bounded by `read_timeout`. Handlers
/// are never cut short, so a registration that has started always lands
/// in the registry and its token is returned to the caller.
pub fn create_app(state: Arc<AppState>, read_timeout: Duration) -> Router {
    create_router(state).layer(RequestBodyTimeoutLayer::new(read_timeout))
}
