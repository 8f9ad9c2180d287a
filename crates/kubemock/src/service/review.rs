//! Outcome of a token review.

use crate::identity::ServiceAccount;

/// Result of reviewing a presented token.
///
/// An unknown token is a normal outcome, reported as
/// [`AuthResult::Unauthenticated`], never as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Authenticated { username: String, uid: String },
    Unauthenticated,
}

impl AuthResult {
    /// Build the authenticated result for a registered account.
    pub fn for_account(account: &ServiceAccount) -> Self {
        Self::Authenticated {
            username: account.canonical_name(),
            uid: account.uid().to_string(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Canonical `system:serviceaccount:<namespace>:<name>` username.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Authenticated { username, .. } => Some(username),
            Self::Unauthenticated => None,
        }
    }

    pub fn uid(&self) -> Option<&str> {
        match self {
            Self::Authenticated { uid, .. } => Some(uid),
            Self::Unauthenticated => None,
        }
    }
}
