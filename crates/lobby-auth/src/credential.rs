//! SHA-256 admin credential.
//!
//! The plaintext secret never outlives construction: it is hashed once and
//! only the digest is kept. Submitted passwords are hashed the same way and
//! compared in constant time.

use std::fmt;

use lobby_config::AdminConfig;
use sha2::{Digest, Sha256};

use crate::error::AuthError;

#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredential {
    digest: [u8; 32],
}

impl AdminCredential {
    /// Hash a plaintext secret.
    #[must_use]
    pub fn from_secret(secret: &str) -> Self {
        Self {
            digest: sha256(secret.as_bytes()),
        }
    }

    /// Parse a hex-encoded SHA-256 digest.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MalformedDigest` unless the input is 64 hex characters.
    pub fn from_hex_digest(hex: &str) -> Result<Self, AuthError> {
        let hex = hex.trim();
        if hex.len() != 64 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AuthError::MalformedDigest(format!(
                "expected 64 hex characters, got {}",
                hex.chars().count()
            )));
        }
        let mut digest = [0u8; 32];
        for (i, byte) in digest.iter_mut().enumerate() {
            let pair = &hex[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|e| AuthError::MalformedDigest(format!("{pair}: {e}")))?;
        }
        Ok(Self { digest })
    }

    /// Build the credential from config. The digest form wins when both are set.
    ///
    /// Returns `Ok(None)` when neither form is configured.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MalformedDigest` if `secret_sha256` is not a valid digest.
    pub fn from_config(config: &AdminConfig) -> Result<Option<Self>, AuthError> {
        if !config.secret_sha256.trim().is_empty() {
            return Self::from_hex_digest(&config.secret_sha256).map(Some);
        }
        if !config.secret.is_empty() {
            return Ok(Some(Self::from_secret(&config.secret)));
        }
        Ok(None)
    }

    /// Check a submitted password against the stored digest.
    #[must_use]
    pub fn verify(&self, submitted: &str) -> bool {
        let candidate = sha256(submitted.as_bytes());
        let mut diff: u8 = 0;
        for (a, b) in self.digest.iter().zip(candidate.iter()) {
            diff |= a ^ b;
        }
        diff == 0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex_encode(&self.digest)
    }
}

// Keep the digest out of logs.
impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredential").finish_non_exhaustive()
    }
}

fn sha256(bytes: &[u8]) -> [u8; 32] {
    let digest = Sha256::digest(bytes);
    let mut output = [0u8; 32];
    output.copy_from_slice(&digest);
    output
}

/// Hex-encode a SHA-256 of the input. Used by `lobby admin hash`.
#[must_use]
pub fn hash_secret_hex(secret: &str) -> String {
    hex_encode(&sha256(secret.as_bytes()))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
