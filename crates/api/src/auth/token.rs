//! Opaque random tokens.
//!
//! Session keys, login tokens, and OAuth state nonces are all the same
//! shape: 32 random bytes, hex-encoded. Session keys are persisted only as
//! their SHA-256 hash so a database leak does not expose live cookies.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a cryptographically random opaque token (64 hex chars).
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Compute the SHA-256 hex digest of a token for server-side storage.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
