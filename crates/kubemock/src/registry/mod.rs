//! In-memory registry of issued tokens.
//!
//! [`IdentityRegistry`] maps each issued token to the service account it
//! asserts. It is the only mutable state shared between request handlers,
//! so every access goes through its methods and its reader-writer lock:
//! lookups run in parallel, mutations are exclusive.
//!
//! Entries are only ever inserted or removed, never edited, and nothing
//! expires. State is lost when the process exits.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use crate::crypto::token_fingerprint;
use crate::identity::ServiceAccount;

/// Concurrency-safe token → service account map.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    entries: RwLock<HashMap<String, ServiceAccount>>,
}

impl IdentityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `token` to `account`, replacing any previous binding.
    pub fn insert(&self, token: impl Into<String>, account: ServiceAccount) {
        let token = token.into();
        let fingerprint = token_fingerprint(&token);
        let replaced = self.write().insert(token, account).is_some();
        if replaced {
            debug!("token {fingerprint} was already registered, binding replaced");
        }
    }

    /// Return the service account bound to `token`, if any.
    pub fn lookup(&self, token: &str) -> Option<ServiceAccount> {
        self.read().get(token).cloned()
    }

    /// Remove every entry.
    pub fn delete_all(&self) -> usize {
        let mut entries = self.write();
        let removed = entries.len();
        entries.clear();
        debug!("cleared {removed} registry entries");
        removed
    }

    /// Remove the entries whose token is in `keys`. Unknown keys are ignored.
    ///
    /// Returns how many entries were actually removed.
    pub fn delete_keys<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut entries = self.write();
        let mut requested = 0;
        let removed = keys
            .into_iter()
            .inspect(|_| requested += 1)
            .filter(|key| entries.remove(key.as_ref()).is_some())
            .count();
        debug!("removed {removed} of {requested} requested registry entries");
        removed
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Every mutation is a single map operation, so a panic in another
    // holder cannot leave a torn entry behind; poisoning is safe to ignore.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ServiceAccount>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ServiceAccount>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
