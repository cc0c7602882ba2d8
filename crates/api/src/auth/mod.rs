//! Authentication primitives.
//!
//! - [`password`] -- PBKDF2-SHA256 password digests and verification.
//! - [`token`] -- opaque random tokens and their storage hashes.
//! - [`oauth`] -- Google OAuth code exchange and userinfo lookup.

pub mod oauth;
pub mod password;
pub mod token;
