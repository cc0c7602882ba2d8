//! Cookie-backed server-side sessions.
//!
//! The browser holds an opaque random key in the `retroflect_session`
//! cookie; the server stores only its SHA-256 hash plus the session payload
//! (OAuth state nonce, bound user, login token). Sessions are created empty
//! on first contact and persist across login and logout; logout (and any
//! failed OAuth callback) clears the payload, not the row.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use retroflect_db::models::session::Session;
use retroflect_db::repositories::SessionRepo;
use retroflect_db::DbPool;

use crate::auth::token::{generate_token, hash_token};
use crate::error::AppResult;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "retroflect_session";

/// Build the session cookie for a freshly issued session key.
///
/// `secure` comes from configuration: the key is the whole credential, so
/// anywhere TLS terminates it must only travel over HTTPS.
fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Load the session referenced by the request's cookie, if any.
pub async fn load(pool: &DbPool, jar: &CookieJar) -> AppResult<Option<Session>> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    let session = SessionRepo::find_by_token_hash(pool, &hash_token(cookie.value())).await?;
    Ok(session)
}

/// Load the request's session, creating an empty one (and setting the
/// cookie) if the request carries none or a stale key.
pub async fn load_or_create(
    pool: &DbPool,
    jar: CookieJar,
    cookie_secure: bool,
) -> AppResult<(Session, CookieJar)> {
    if let Some(session) = load(pool, &jar).await? {
        return Ok((session, jar));
    }

    let token = generate_token();
    let session = SessionRepo::create(pool, &hash_token(&token)).await?;
    let jar = jar.add(session_cookie(token, cookie_secure));
    Ok((session, jar))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("abc123".into(), false);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_secure_flag_follows_config() {
        let cookie = session_cookie("abc123".into(), true);
        assert_eq!(cookie.secure(), Some(true));
    }
}
