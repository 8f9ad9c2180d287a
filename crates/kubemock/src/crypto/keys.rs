//! Ephemeral RSA signing keys.
//!
//! Every issued token gets its own key. The key lives only as long as the
//! [`EphemeralSigningKey`] value; `rsa` zeroizes the private key on drop.

use jsonwebtoken::EncodingKey;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::RsaPrivateKey;

use crate::error::{MockError, Result};

/// Modulus size for issued keys, matching Kubernetes service account keys.
pub const RSA_KEY_BITS: usize = 2048;

/// A single-use RSA private key.
pub struct EphemeralSigningKey {
    private_key: RsaPrivateKey,
}

impl EphemeralSigningKey {
    /// Generate a fresh RSA-2048 key from the OS-seeded thread RNG.
    pub fn generate() -> Result<Self> {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
            .map_err(|e| MockError::KeyGeneration(e.to_string()))?;
        Ok(Self { private_key })
    }

    /// Convert the key into a `jsonwebtoken` RS256 encoding key.
    pub fn encoding_key(&self) -> Result<EncodingKey> {
        let der = self
            .private_key
            .to_pkcs1_der()
            .map_err(|e| MockError::KeyEncoding(e.to_string()))?;
        Ok(EncodingKey::from_rsa_der(der.as_bytes()))
    }

    /// Public half, for checking signatures in tests. Never handed out at
    /// runtime so nothing can re-verify an issued token.
    #[cfg(test)]
    pub(crate) fn public_key(&self) -> rsa::RsaPublicKey {
        self.private_key.to_public_key()
    }
}
