//! The (uid, name, namespace) triple behind every issued token.

use serde::{Deserialize, Serialize};

/// Prefix Kubernetes puts in front of service account usernames.
///
/// Consumers such as Vault's Kubernetes auth method match on this exact
/// string, so it must not change.
pub const CANONICAL_PREFIX: &str = "system:serviceaccount";

/// A mock Kubernetes service account.
///
/// Missing fields decode as empty strings, matching how lenient JSON
/// decoders treat absent keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceAccount {
    #[serde(default)]
    uid: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    namespace: String,
}

impl ServiceAccount {
    /// Create a service account descriptor.
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Return the username a token review reports for this account:
    /// `system:serviceaccount:<namespace>:<name>`.
    pub fn canonical_name(&self) -> String {
        format!("{CANONICAL_PREFIX}:{}:{}", self.namespace, self.name)
    }
}

impl std::fmt::Display for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (uid {})", self.canonical_name(), self.uid)
    }
}
