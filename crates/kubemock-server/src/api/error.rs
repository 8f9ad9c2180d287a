//! API error type and its JSON body.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failure reported to the caller as `{"success": false, "error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    /// Unknown route, or a known route called with the wrong method.
    #[error("{0}")]
    NotImplemented(String),

    /// Token issuance failed.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Error for `handler` being called with a method it does not serve.
    pub fn wrong_method(handler: &str, expected: &str, got: &Method) -> Self {
        Self::NotImplemented(format!("{handler} expects {expected} but got {:?}", got.as_str()))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
