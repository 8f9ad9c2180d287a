//! RS256 issuer backed by a fresh RSA key per token.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::debug;

use super::claims::ServiceAccountClaims;
use super::TokenIssuer;
use crate::crypto::{token_fingerprint, EphemeralSigningKey};
use crate::error::{MockError, Result};
use crate::identity::ServiceAccount;

/// Issues RS256 JWTs, each signed by a key generated for it alone.
///
/// The key is dropped as soon as the token is signed. Tokens are therefore
/// unique (no two share a key) and unverifiable (no one holds the public
/// key); the registry is the only thing that can vouch for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaTokenIssuer;

impl RsaTokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenIssuer for RsaTokenIssuer {
    fn issue(&self, account: &ServiceAccount) -> Result<String> {
        let key = EphemeralSigningKey::generate()?;
        let claims = ServiceAccountClaims::for_account(account, crate::time::now_secs());
        let token = sign_claims(&key.encoding_key()?, &claims)?;

        debug!(
            "issued token {} for {}",
            token_fingerprint(&token),
            account.canonical_name()
        );
        Ok(token)
    }
}

/// Encode `claims` as a compact RS256 JWT.
pub(crate) fn sign_claims(key: &EncodingKey, claims: &ServiceAccountClaims) -> Result<String> {
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, key)
        .map_err(|e| MockError::Signing(e.to_string()))
}
