use axum::{
    extract::{Form, Path, State},
    response::Redirect,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::{
    db::models::Tip,
    extractors::AuthGuard,
    names,
    rejections::{AppError, ResultExt},
    views,
    views::tip as tip_views,
    AppState,
};

use super::ensure_admin_or_author;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quizzes/{quiz_id}/tips", post(create))
        .route("/quizzes/{quiz_id}/tips/{tip_id}/accept", post(accept))
        .route(
            "/quizzes/{quiz_id}/tips/{tip_id}/edit",
            get(edit_form).post(update),
        )
        .route("/quizzes/{quiz_id}/tips/{tip_id}/delete", post(destroy))
}

#[derive(Deserialize)]
struct TipForm {
    #[serde(default)]
    text: String,
}

async fn create(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Form(form): Form<TipForm>,
) -> Result<Redirect, AppError> {
    // The quiz must exist before a tip can hang off it.
    state
        .db
        .quiz(quiz_id)
        .await
        .reject("could not load quiz")?
        .ok_or(AppError::NotFound("there is no quiz with that id"))?;

    let text = form.text.trim();
    if text.is_empty() {
        return Ok(back_to_quiz(quiz_id, "tip_empty"));
    }

    state
        .db
        .create_tip(quiz_id, text, user.id)
        .await
        .reject("could not create tip")?;

    Ok(back_to_quiz(quiz_id, "tip_created"))
}

async fn accept(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path((quiz_id, tip_id)): Path<(i64, i64)>,
) -> Result<Redirect, AppError> {
    // Accepting is moderation on the quiz, so the quiz's author decides.
    let quiz = state
        .db
        .quiz(quiz_id)
        .await
        .reject("could not load quiz")?
        .ok_or(AppError::NotFound("there is no quiz with that id"))?;
    ensure_admin_or_author(&user, quiz.author_id)?;

    let tip = load_tip(&state, quiz_id, tip_id).await?;

    state
        .db
        .accept_tip(tip.id)
        .await
        .reject("could not accept tip")?;

    Ok(back_to_quiz(quiz_id, "tip_accepted"))
}

async fn edit_form(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path((quiz_id, tip_id)): Path<(i64, i64)>,
) -> Result<maud::Markup, AppError> {
    let quiz = state
        .db
        .quiz(quiz_id)
        .await
        .reject("could not load quiz")?
        .ok_or(AppError::NotFound("there is no quiz with that id"))?;

    let tip = load_tip(&state, quiz_id, tip_id).await?;
    ensure_admin_or_author(&user, tip.author_id)?;

    Ok(views::page(
        "Edit tip",
        Some(&user),
        tip_views::edit_form(&quiz, &tip, None),
    ))
}

async fn update(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path((quiz_id, tip_id)): Path<(i64, i64)>,
    Form(form): Form<TipForm>,
) -> Result<axum::response::Response, AppError> {
    use axum::response::IntoResponse;

    let quiz = state
        .db
        .quiz(quiz_id)
        .await
        .reject("could not load quiz")?
        .ok_or(AppError::NotFound("there is no quiz with that id"))?;

    let tip = load_tip(&state, quiz_id, tip_id).await?;
    ensure_admin_or_author(&user, tip.author_id)?;

    let text = form.text.trim();
    if text.is_empty() {
        let body = tip_views::edit_form(&quiz, &tip, Some("Tip text must not be empty."));
        return Ok(views::page("Edit tip", Some(&user), body).into_response());
    }

    state
        .db
        .update_tip(tip.id, text)
        .await
        .reject("could not update tip")?;

    Ok(back_to_quiz(quiz_id, "tip_updated").into_response())
}

async fn destroy(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path((quiz_id, tip_id)): Path<(i64, i64)>,
) -> Result<Redirect, AppError> {
    let tip = load_tip(&state, quiz_id, tip_id).await?;
    ensure_admin_or_author(&user, tip.author_id)?;

    state
        .db
        .delete_tip(tip.id)
        .await
        .reject("could not delete tip")?;

    Ok(back_to_quiz(quiz_id, "tip_deleted"))
}

async fn load_tip(state: &AppState, quiz_id: i64, tip_id: i64) -> Result<Tip, AppError> {
    let tip = state
        .db
        .tip(tip_id)
        .await
        .reject("could not load tip")?
        .ok_or(AppError::NotFound("there is no tip with that id"))?;

    if tip.quiz_id != quiz_id {
        return Err(AppError::NotFound("there is no such tip on that quiz"));
    }

    Ok(tip)
}

fn back_to_quiz(quiz_id: i64, notice: &str) -> Redirect {
    Redirect::to(&format!("{}?notice={notice}", names::quiz_url(quiz_id)))
}
