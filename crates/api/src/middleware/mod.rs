//! Request extractors for authentication.
//!
//! - [`auth::CurrentUser`] -- resolves the session cookie to an active user.

pub mod auth;
