//! Error types for kubemock.
//!
//! Only token issuance can fail. An unknown token is a normal review
//! outcome, not an error. Private key material is never included in
//! error messages.

/// Errors raised while issuing a token.
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("generate secret key: {0}")]
    KeyGeneration(String),

    #[error("encode secret key: {0}")]
    KeyEncoding(String),

    #[error("sign token: {0}")]
    Signing(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, MockError>;
