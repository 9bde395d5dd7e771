use axum::{
    extract::{Form, Path, Query, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::{
    db::models::{AuthUser, Quiz},
    extractors::{AuthGuard, MaybeUser},
    game, names,
    rejections::{AppError, ResultExt},
    utils, views,
    views::quiz as quiz_views,
    AppState,
};

use super::ensure_admin_or_author;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quizzes", get(index).post(create))
        .route("/quizzes/new", get(new_form))
        .route("/quizzes/randomplay", get(random_play))
        .route("/quizzes/randomcheck/{id}", get(random_check))
        .route("/quizzes/{id}", get(show))
        .route("/quizzes/{id}/edit", get(edit_form).post(update))
        .route("/quizzes/{id}/delete", post(destroy))
        .route("/quizzes/{id}/play", get(play))
        .route("/quizzes/{id}/check", get(check))
        .route("/users/{user_id}/quizzes", get(user_index))
}

#[derive(Deserialize)]
struct IndexQuery {
    #[serde(default)]
    search: String,
    #[serde(default)]
    pageno: Option<i64>,
    #[serde(default)]
    notice: String,
}

#[derive(Deserialize)]
struct QuizForm {
    question: String,
    answer: String,
}

#[derive(Deserialize)]
struct AnswerQuery {
    #[serde(default)]
    answer: String,
}

async fn index(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Query(query): Query<IndexQuery>,
) -> Result<maud::Markup, AppError> {
    render_index(&state, viewer, None, query).await
}

async fn user_index(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(user_id): Path<i64>,
    Query(query): Query<IndexQuery>,
) -> Result<maud::Markup, AppError> {
    let author = state
        .db
        .find_user_by_id(user_id)
        .await
        .reject("could not load user")?
        .ok_or(AppError::NotFound("there is no user with that id"))?;

    render_index(&state, viewer, Some(author), query).await
}

async fn render_index(
    state: &AppState,
    viewer: Option<AuthUser>,
    author: Option<AuthUser>,
    query: IndexQuery,
) -> Result<maud::Markup, AppError> {
    let search = query.search.trim();
    let search_filter = (!search.is_empty()).then_some(search);
    let author_id = author.as_ref().map(|a| a.id);

    let count = state
        .db
        .count_quizzes(search_filter, author_id)
        .await
        .reject("could not count quizzes")?;

    let pageno = query.pageno.unwrap_or(1).max(1);
    let offset = names::ITEMS_PER_PAGE * (pageno - 1);

    let quizzes = state
        .db
        .quizzes_page(search_filter, author_id, names::ITEMS_PER_PAGE, offset)
        .await
        .reject("could not load quizzes")?;

    let (title, base) = match &author {
        Some(author) => (
            format!("Questions of {}", author.username),
            names::user_quizzes_url(author.id),
        ),
        None => ("Questions".to_owned(), names::QUIZZES_URL.to_owned()),
    };

    let pagination =
        views::components::pagination(count, names::ITEMS_PER_PAGE, pageno, &base, search);

    Ok(views::page(
        &title,
        viewer.as_ref(),
        quiz_views::index(
            &title,
            &quizzes,
            search,
            &query.notice,
            pagination,
            viewer.as_ref(),
        ),
    ))
}

#[derive(Deserialize)]
struct ShowQuery {
    #[serde(default)]
    notice: String,
}

async fn show(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<i64>,
    Query(query): Query<ShowQuery>,
) -> Result<maud::Markup, AppError> {
    let quiz = load_quiz(&state, id).await?;
    let tips = state
        .db
        .tips_for_quiz(id)
        .await
        .reject("could not load tips")?;

    Ok(views::page(
        &quiz.question,
        viewer.as_ref(),
        quiz_views::show(&quiz, &tips, &query.notice, viewer.as_ref()),
    ))
}

async fn new_form(AuthGuard(user): AuthGuard) -> maud::Markup {
    views::page(
        "New quiz",
        Some(&user),
        quiz_views::form("New quiz", names::QUIZZES_URL, "", "", None),
    )
}

async fn create(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Form(form): Form<QuizForm>,
) -> Result<Response, AppError> {
    let question = form.question.trim();
    let answer = form.answer.trim();

    if question.is_empty() || answer.is_empty() {
        let body = quiz_views::form(
            "New quiz",
            names::QUIZZES_URL,
            question,
            answer,
            Some("Question and answer must not be empty."),
        );
        return Ok(views::page("New quiz", Some(&user), body).into_response());
    }

    let quiz_id = state
        .db
        .create_quiz(question, answer, user.id)
        .await
        .reject("could not create quiz")?;

    Ok(Redirect::to(&format!("{}?notice=created", names::quiz_url(quiz_id))).into_response())
}

async fn edit_form(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<maud::Markup, AppError> {
    let quiz = load_quiz(&state, id).await?;
    ensure_admin_or_author(&user, quiz.author_id)?;

    Ok(views::page(
        "Edit quiz",
        Some(&user),
        quiz_views::form(
            "Edit quiz",
            &names::edit_quiz_url(id),
            &quiz.question,
            &quiz.answer,
            None,
        ),
    ))
}

async fn update(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<QuizForm>,
) -> Result<Response, AppError> {
    let quiz = load_quiz(&state, id).await?;
    ensure_admin_or_author(&user, quiz.author_id)?;

    let question = form.question.trim();
    let answer = form.answer.trim();

    if question.is_empty() || answer.is_empty() {
        let body = quiz_views::form(
            "Edit quiz",
            &names::edit_quiz_url(id),
            question,
            answer,
            Some("Question and answer must not be empty."),
        );
        return Ok(views::page("Edit quiz", Some(&user), body).into_response());
    }

    state
        .db
        .update_quiz(id, question, answer)
        .await
        .reject("could not update quiz")?;

    Ok(Redirect::to(&format!("{}?notice=updated", names::quiz_url(id))).into_response())
}

async fn destroy(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let quiz = load_quiz(&state, id).await?;
    ensure_admin_or_author(&user, quiz.author_id)?;

    state
        .db
        .delete_quiz(id)
        .await
        .reject("could not delete quiz")?;

    Ok(Redirect::to(&format!("{}?notice=deleted", names::QUIZZES_URL)))
}

async fn play(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<i64>,
    Query(query): Query<AnswerQuery>,
) -> Result<maud::Markup, AppError> {
    let quiz = load_quiz(&state, id).await?;

    Ok(views::page(
        "Play",
        viewer.as_ref(),
        quiz_views::play(&quiz, &query.answer),
    ))
}

async fn check(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<i64>,
    Query(query): Query<AnswerQuery>,
) -> Result<maud::Markup, AppError> {
    let quiz = load_quiz(&state, id).await?;
    let correct = game::answers_match(&query.answer, &quiz.answer);

    Ok(views::page(
        "Result",
        viewer.as_ref(),
        quiz_views::check_result(&quiz, &query.answer, correct),
    ))
}

async fn random_play(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let catalog = state
        .db
        .all_quizzes()
        .await
        .reject("could not load quizzes")?;

    let (token, headers) = play_session(&state, &jar)?;

    // Draw and re-store under one lock; concurrent requests on the same
    // play cookie must not see the same pool snapshot.
    let body = state.plays.with_state(&token, |play| {
        if play.is_round_complete(catalog.len()) {
            let score = play.score();
            play.reset();
            return quiz_views::random_nomore(score);
        }

        match play.next_item(&catalog, &mut rand::thread_rng()) {
            Ok(quiz) => quiz_views::random_play(quiz, play.score()),
            // No quizzes exist: informational page, not a fault.
            Err(game::EmptyCatalogError) => quiz_views::random_empty(),
        }
    });

    Ok((headers, views::page("Random play", viewer.as_ref(), body)).into_response())
}

async fn random_check(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    jar: CookieJar,
    Path(id): Path<i64>,
    Query(query): Query<AnswerQuery>,
) -> Result<Response, AppError> {
    let quiz = load_quiz(&state, id).await?;

    let catalog_size = state
        .db
        .count_quizzes(None, None)
        .await
        .reject("could not count quizzes")? as usize;

    let (token, headers) = play_session(&state, &jar)?;

    let body = state.plays.with_state(&token, |play| {
        let correct = play.submit_answer(&query.answer, &quiz.answer);

        if correct && play.is_round_complete(catalog_size) {
            let score = play.score();
            play.reset();
            quiz_views::random_nomore(score)
        } else {
            quiz_views::random_result(&query.answer, correct, play.score())
        }
    });

    Ok((headers, views::page("Random play", viewer.as_ref(), body)).into_response())
}

/// Identify the browser's random-play session, minting a cookie for
/// first-time players.
fn play_session(state: &AppState, jar: &CookieJar) -> Result<(String, HeaderMap), AppError> {
    let mut headers = HeaderMap::new();

    let token = match jar.get(names::PLAY_COOKIE_NAME) {
        Some(cookie) => cookie.value().to_owned(),
        None => {
            let token = ulid::Ulid::new().to_string();
            let cookie = utils::cookie(names::PLAY_COOKIE_NAME, &token, state.secure_cookies);
            headers.insert(
                SET_COOKIE,
                cookie.parse().map_err(|e| {
                    tracing::error!("could not build play cookie: {e}");
                    AppError::Internal("could not build play cookie")
                })?,
            );
            token
        }
    };

    Ok((token, headers))
}

async fn load_quiz(state: &AppState, id: i64) -> Result<Quiz, AppError> {
    state
        .db
        .quiz(id)
        .await
        .reject("could not load quiz")?
        .ok_or(AppError::NotFound("there is no quiz with that id"))
}
