//! Registration, review, and reset of mock service account tokens.
//!
//! [`TokenReviewService`] ties a [`TokenIssuer`] to an
//! [`IdentityRegistry`]:
//!
//! - [`register`](TokenReviewService::register) issues a token and records
//!   which account it belongs to.
//! - [`validate`](TokenReviewService::validate) answers a token review from
//!   the registry alone.
//! - [`reset`](TokenReviewService::reset) forgets all or some tokens.
//!
//! # Reset keys
//!
//! The registry is keyed by token. A selective reset removes entries whose
//! *token* is listed; passing service account uids removes nothing unless a
//! uid happens to equal an issued token.

pub mod review;

pub use review::AuthResult;

use log::debug;

use crate::crypto::token_fingerprint;
use crate::error::Result;
use crate::identity::ServiceAccount;
use crate::issuer::{RsaTokenIssuer, TokenIssuer};
use crate::registry::IdentityRegistry;

/// Mock token review backend.
pub struct TokenReviewService<I = RsaTokenIssuer> {
    issuer: I,
    registry: IdentityRegistry,
}

impl TokenReviewService<RsaTokenIssuer> {
    /// Create a service that issues RS256 tokens with ephemeral keys.
    pub fn new() -> Self {
        Self::with_issuer(RsaTokenIssuer::new())
    }
}

impl Default for TokenReviewService<RsaTokenIssuer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: TokenIssuer> TokenReviewService<I> {
    /// Create a service around a custom issuer and an empty registry.
    pub fn with_issuer(issuer: I) -> Self {
        Self {
            issuer,
            registry: IdentityRegistry::new(),
        }
    }

    /// Issue a token for `account` and register it.
    ///
    /// Not idempotent: each call yields a new token, and every token stays
    /// valid until reset. If issuance fails the registry is left untouched.
    pub fn register(&self, account: ServiceAccount) -> Result<String> {
        let token = self.issuer.issue(&account)?;
        debug!(
            "registering {} under token {}",
            account,
            token_fingerprint(&token)
        );
        self.registry.insert(token.clone(), account);
        Ok(token)
    }

    /// Review `token`: authenticated with the bound account if registered,
    /// unauthenticated otherwise.
    pub fn validate(&self, token: &str) -> AuthResult {
        match self.registry.lookup(token) {
            Some(account) => AuthResult::for_account(&account),
            None => {
                debug!("review of unknown token {}", token_fingerprint(token));
                AuthResult::Unauthenticated
            }
        }
    }

    /// Forget every token when `keys` is empty, otherwise only the tokens
    /// listed in `keys`. Returns the number of entries removed.
    pub fn reset(&self, keys: &[String]) -> usize {
        if keys.is_empty() {
            self.registry.delete_all()
        } else {
            self.registry.delete_keys(keys)
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }
}
