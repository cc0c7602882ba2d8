//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use retroflect_core::error::CoreError;
use retroflect_core::types::DbId;
use retroflect_db::repositories::UserRepo;

use crate::error::AppError;
use crate::sessions;
use crate::state::AppState;

/// Authenticated user resolved from the session cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Resolution fails with 401 when the cookie is absent, the session is
/// unknown or unbound, or the bound user is inactive or soft-deleted (a
/// stale session after deactivation).
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The user's email.
    pub email: String,
    /// The id of the session row the user was resolved from.
    pub session_id: DbId,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let session = sessions::load(&state.pool, &jar)
            .await?
            .ok_or_else(unauthenticated)?;

        let user_id = session.user_id.ok_or_else(unauthenticated)?;

        let user = UserRepo::find_authenticable_by_id(&state.pool, user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id, "session bound to a missing or deactivated user");
                unauthenticated()
            })?;

        Ok(CurrentUser {
            user_id: user.id,
            email: user.email,
            session_id: session.id,
        })
    }
}

fn unauthenticated() -> AppError {
    AppError::Core(CoreError::Unauthorized("Authentication required".into()))
}
