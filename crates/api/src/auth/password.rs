//! PBKDF2-SHA256 password digests and verification.
//!
//! Passwords are stored as the raw PBKDF2 output computed with a fixed
//! salt, iteration count, and output length, so a stored digest can be
//! compared byte-for-byte against a freshly computed one. Comparison is
//! constant-time to close the timing side channel.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Fixed application-wide salt for password digests.
const PASSWORD_SALT: &[u8] = b"retroflect.auth.v1";

/// PBKDF2 iteration count.
const ITERATION_COUNT: u32 = 10_000;

/// Digest output length in bytes.
const KEY_LENGTH: usize = 64;

/// Compute the PBKDF2-SHA256 digest of a plaintext password.
pub fn encrypt_password(password: &str) -> Vec<u8> {
    let mut digest = vec![0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        PASSWORD_SALT,
        ITERATION_COUNT,
        &mut digest,
    );
    digest
}

/// Verify a plaintext password against a stored digest.
///
/// A `None` stored digest (OAuth-only account) never matches anything. The
/// comparison runs in constant time over the fixed digest length.
pub fn verify_password(password: &str, stored: Option<&[u8]>) -> bool {
    let Some(stored) = stored else {
        return false;
    };
    let computed = encrypt_password(password);
    computed.as_slice().ct_eq(stored).into()
}
