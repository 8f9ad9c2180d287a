//! Wire types for the HTTP API.

use serde::{Deserialize, Serialize};

use kubemock::AuthResult;

/// `apiVersion` of TokenReview objects.
pub const TOKEN_REVIEW_API_VERSION: &str = "authentication.k8s.io/v1";

/// `kind` of TokenReview objects.
pub const TOKEN_REVIEW_KIND: &str = "TokenReview";

/// Incoming TokenReview. Only `spec.token` is read.
#[derive(Debug, Default, Deserialize)]
pub struct TokenReviewRequest {
    #[serde(default)]
    pub spec: TokenReviewSpec,
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenReviewSpec {
    #[serde(default)]
    pub token: String,
}

/// TokenReview answered with a status.
#[derive(Debug, Serialize)]
pub struct TokenReviewResponse {
    #[serde(rename = "apiVersion")]
    pub api_version: &'static str,
    pub kind: &'static str,
    pub status: TokenReviewStatus,
}

#[derive(Debug, Serialize)]
pub struct TokenReviewStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub uid: String,
}

impl From<AuthResult> for TokenReviewResponse {
    fn from(result: AuthResult) -> Self {
        let status = match result {
            AuthResult::Authenticated { username, uid } => TokenReviewStatus {
                authenticated: true,
                user: Some(UserInfo { username, uid }),
            },
            AuthResult::Unauthenticated => TokenReviewStatus {
                authenticated: false,
                user: None,
            },
        };
        Self {
            api_version: TOKEN_REVIEW_API_VERSION,
            kind: TOKEN_REVIEW_KIND,
            status,
        }
    }
}

/// Successful registration. The token is returned under `jwt`.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub jwt: String,
}

/// Optional body of a reset request. Listed keys are matched against
/// issued tokens; a missing, `null` or empty list resets everything.
#[derive(Debug, Default, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub uids: Option<Vec<String>>,
}

impl ResetRequest {
    /// Keys to remove. Empty means remove all.
    pub fn keys(&self) -> &[String] {
        self.uids.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub removed: usize,
}
