//! JWT claim set of an issued token.

use serde::{Deserialize, Serialize};

use crate::identity::ServiceAccount;

/// `iss` value of legacy Kubernetes service account tokens.
pub const SERVICE_ACCOUNT_ISSUER: &str = "kubernetes/serviceaccount";

/// Claims embedded in every issued token.
///
/// The three `kubernetes.io/serviceaccount/...` claims are the ones
/// consumers read to learn the service account; `iss`, `sub` and `iat`
/// mirror the rest of a real token's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccountClaims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    #[serde(rename = "kubernetes.io/serviceaccount/service-account.uid")]
    pub uid: String,
    #[serde(rename = "kubernetes.io/serviceaccount/service-account.name")]
    pub name: String,
    #[serde(rename = "kubernetes.io/serviceaccount/namespace")]
    pub namespace: String,
}

impl ServiceAccountClaims {
    /// Build the claim set for `account`, issued at `iat` (Unix seconds).
    pub fn for_account(account: &ServiceAccount, iat: i64) -> Self {
        Self {
            iss: SERVICE_ACCOUNT_ISSUER.to_string(),
            sub: account.canonical_name(),
            iat,
            uid: account.uid().to_string(),
            name: account.name().to_string(),
            namespace: account.namespace().to_string(),
        }
    }
}
