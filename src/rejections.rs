use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{names, views};

/// Handler-level failure. Everything here renders a user-facing page;
/// nothing is fatal to the process.
#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    NotFound(&'static str),
    Unauthorized,
    Forbidden,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_page(message)).into_response()
            }
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, error_page(message)).into_response()
            }
            // Anonymous visitors get sent to the login form instead of a
            // bare 401.
            AppError::Unauthorized => Redirect::to(names::LOGIN_URL).into_response(),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                error_page("you are neither the author nor an administrator"),
            )
                .into_response(),
        }
    }
}

fn error_page(message: &str) -> maud::Markup {
    views::page(
        "Error",
        None,
        maud::html! {
            h1 { (message) }
            p { a href=(names::QUIZZES_URL) { "Back to quizzes" } }
        },
    )
}

/// Log the underlying error and replace it with an `AppError` carrying a
/// static, user-safe message.
pub trait ResultExt<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal(message)
        })
    }
}
