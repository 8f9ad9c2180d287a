//! Token issuance.
//!
//! A [`TokenIssuer`] turns a [`ServiceAccount`] into an opaque bearer
//! token. The production issuer, [`RsaTokenIssuer`], mints RS256 JWTs that
//! look like real service account tokens but are signed with a throwaway
//! key, so nothing can verify them cryptographically.

pub mod claims;
pub mod rsa_issuer;

pub use claims::{ServiceAccountClaims, SERVICE_ACCOUNT_ISSUER};
pub use rsa_issuer::RsaTokenIssuer;

use crate::error::Result;
use crate::identity::ServiceAccount;

/// Manufactures tokens for service accounts.
///
/// Issuers are called from many request handlers at once and must be
/// shareable across threads.
pub trait TokenIssuer: Send + Sync {
    /// Issue a new token asserting `account`.
    fn issue(&self, account: &ServiceAccount) -> Result<String>;
}
