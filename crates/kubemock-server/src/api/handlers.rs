//! Request handlers.
//!
//! Bodies are taken as raw bytes and decoded here rather than through
//! axum's `Json` extractor: clients are not required to send a
//! `Content-Type`, and decode failures must use the API's own error body.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use kubemock::crypto::token_fingerprint;
use kubemock::ServiceAccount;

use super::error::ApiError;
use super::types::{
    RegisterResponse, ResetRequest, ResetResponse, TokenReviewRequest, TokenReviewResponse,
};
use super::AppState;

/// Decode a JSON body, naming the request kind in the error.
fn decode_body<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Could not decode {what} request");
        ApiError::BadRequest(format!("invalid {what} request: {e}"))
    })
}

/// Review a token.
///
/// POST|PUT /apis/authentication.k8s.io/v1/tokenreviews
pub async fn token_review(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TokenReviewResponse>, ApiError> {
    debug!("Kube auth server received login request");

    let req: TokenReviewRequest = decode_body(&body, "login")?;
    let result = state.service.validate(&req.spec.token);

    debug!(
        token = %token_fingerprint(&req.spec.token),
        authenticated = result.is_authenticated(),
        "Handled kube login request"
    );
    Ok(Json(result.into()))
}

/// Register a service account and return a token for it.
///
/// POST /api/v1/testing/serviceaccounts
pub async fn register_service_account(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<RegisterResponse>, ApiError> {
    debug!("Kube auth server received service account registration request");

    let account: ServiceAccount = decode_body(&body, "service account registration")?;
    let canonical_name = account.canonical_name();

    // Key generation is CPU-bound; keep it off the async workers.
    let issued = tokio::task::spawn_blocking(move || state.service.register(account))
        .await
        .map_err(|e| {
            error!(error = %e, service_account = %canonical_name, "Token issuance task failed");
            ApiError::Internal(format!("generate jwt token: {e}"))
        })?;

    let jwt = issued.map_err(|e| {
        error!(error = %e, service_account = %canonical_name, "Could not generate jwt token");
        ApiError::Internal(format!("generate jwt token: {e}"))
    })?;

    debug!(
        service_account = %canonical_name,
        token = %token_fingerprint(&jwt),
        "Registered service account"
    );
    Ok(Json(RegisterResponse { success: true, jwt }))
}

/// Forget all registered tokens, or only those listed.
///
/// DELETE /api/v1/testing/reset
pub async fn reset(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ResetResponse>, ApiError> {
    debug!("Kube auth server received reset request");

    let req = if body.iter().all(u8::is_ascii_whitespace) {
        ResetRequest::default()
    } else {
        decode_body::<Option<ResetRequest>>(&body, "reset")?.unwrap_or_default()
    };

    let removed = state.service.reset(req.keys());
    debug!(removed, selective = !req.keys().is_empty(), "Reset service account registry");
    Ok(Json(ResetResponse {
        success: true,
        removed,
    }))
}

/// Liveness probe.
///
/// GET /api/v1/testing/health
pub async fn health() -> StatusCode {
    debug!("Kube auth server received health probe");
    StatusCode::OK
}

/// Catch-all for routes this mock does not serve.
pub async fn unimplemented(uri: Uri) -> ApiError {
    debug!(request_url = %uri, "Kube auth server received unimplemented request");
    ApiError::NotImplemented(format!("unimplemented request: {uri}"))
}
