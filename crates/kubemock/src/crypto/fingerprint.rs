//! Log-safe token fingerprints.

use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a fingerprint.
const FINGERPRINT_LEN: usize = 8;

/// Return a short hex fingerprint of a token.
///
/// Bearer tokens must never reach the logs; the fingerprint is enough to
/// correlate a registration with later reviews.
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(&digest[..FINGERPRINT_LEN])
}
