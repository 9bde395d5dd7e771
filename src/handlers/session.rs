use axum::{
    extract::{Form, State},
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    extractors::MaybeUser,
    names,
    rejections::{AppError, ResultExt},
    utils, views,
    views::session as session_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login_post))
        .route("/logout", post(logout_post))
        .route("/register", get(register_page).post(register_post))
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn login_page(MaybeUser(viewer): MaybeUser) -> Response {
    if viewer.is_some() {
        return Redirect::to(names::QUIZZES_URL).into_response();
    }
    views::page("Log in", None, session_views::login(None)).into_response()
}

async fn login_post(
    State(state): State<AppState>,
    Form(body): Form<Credentials>,
) -> Result<Response, AppError> {
    let valid = state
        .db
        .verify_user_password(&body.username, &body.password)
        .await
        .reject("could not verify password")?;

    if !valid {
        tracing::warn!("failed login attempt for '{}'", body.username);
        let body = session_views::login(Some("Invalid username or password."));
        return Ok((StatusCode::UNAUTHORIZED, views::page("Log in", None, body)).into_response());
    }

    let user = state
        .db
        .find_user_by_username(&body.username)
        .await
        .reject("could not load user")?
        .ok_or(AppError::Internal("could not load user"))?;

    session_response(&state, user.id).await
}

async fn logout_post(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    if let Some(cookie) = jar.get(names::USER_SESSION_COOKIE_NAME) {
        state
            .db
            .delete_user_session(cookie.value())
            .await
            .reject("could not delete session")?;
    }

    Ok((
        StatusCode::SEE_OTHER,
        [
            (
                SET_COOKIE,
                HeaderValue::from_str(&utils::clear_cookie(names::USER_SESSION_COOKIE_NAME))
                    .expect("static cookie string"),
            ),
            (LOCATION, HeaderValue::from_static(names::QUIZZES_URL)),
        ],
        "",
    )
        .into_response())
}

async fn register_page(MaybeUser(viewer): MaybeUser) -> Response {
    if viewer.is_some() {
        return Redirect::to(names::QUIZZES_URL).into_response();
    }
    views::page("Register", None, session_views::register("", None)).into_response()
}

async fn register_post(
    State(state): State<AppState>,
    Form(body): Form<Credentials>,
) -> Result<Response, AppError> {
    let username = body.username.trim();

    if username.is_empty() || body.password.is_empty() {
        let body = session_views::register(username, Some("Username and password are required."));
        return Ok(views::page("Register", None, body).into_response());
    }

    if state
        .db
        .find_user_by_username(username)
        .await
        .reject("could not check username")?
        .is_some()
    {
        let body = session_views::register(username, Some("That username is already taken."));
        return Ok(views::page("Register", None, body).into_response());
    }

    let user_id = state
        .db
        .create_user(username, &body.password, false)
        .await
        .reject("could not create user")?;

    session_response(&state, user_id).await
}

/// Open a DB-backed session for the user and redirect home with the
/// session cookie set.
async fn session_response(state: &AppState, user_id: i64) -> Result<Response, AppError> {
    let token = state
        .db
        .create_user_session(user_id)
        .await
        .reject("could not create session")?;

    let cookie = utils::cookie(names::USER_SESSION_COOKIE_NAME, &token, state.secure_cookies);

    Ok((
        StatusCode::SEE_OTHER,
        [
            (
                SET_COOKIE,
                HeaderValue::from_str(&cookie).map_err(|e| {
                    tracing::error!("could not build session cookie: {e}");
                    AppError::Internal("could not build session cookie")
                })?,
            ),
            (LOCATION, HeaderValue::from_static(names::QUIZZES_URL)),
        ],
        "",
    )
        .into_response())
}
