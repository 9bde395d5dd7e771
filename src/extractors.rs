use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::{db::models::AuthUser, names, rejections::AppError, AppState};

/// Guard extractor that verifies the user session cookie against the
/// database. Rejects anonymous requests by redirecting to the login page.
pub struct AuthGuard(pub AuthUser);

impl FromRequestParts<AppState> for AuthGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match lookup_user(parts, state).await {
            Some(user) => Ok(AuthGuard(user)),
            None => Err(AppError::Unauthorized),
        }
    }
}

/// Like `AuthGuard`, but anonymous requests pass through with `None`.
/// Used by pages that render differently for logged-in users.
pub struct MaybeUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(lookup_user(parts, state).await))
    }
}

async fn lookup_user(parts: &Parts, state: &AppState) -> Option<AuthUser> {
    let jar = CookieJar::from_headers(&parts.headers);
    let session_id = jar.get(names::USER_SESSION_COOKIE_NAME)?.value().to_owned();
    state.db.get_user_by_session(&session_id).await.ok()?
}
