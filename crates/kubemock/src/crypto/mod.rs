//! Cryptographic helpers for kubemock.
//!
//! This module provides:
//! - Ephemeral RSA-2048 key generation for one-shot token signing
//! - Short SHA-256 fingerprints so tokens can be logged without leaking them

pub mod fingerprint;
pub mod keys;

pub use fingerprint::token_fingerprint;
pub use keys::{EphemeralSigningKey, RSA_KEY_BITS};
