pub mod db;
pub mod extractors;
pub mod game;
pub mod handlers;
pub mod names;
pub mod rejections;
pub mod statics;
pub mod utils;
pub mod views;

use axum::{response::Redirect, routing::get, Router};

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub plays: game::PlayStore,
    pub secure_cookies: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(names::QUIZZES_URL) }))
        .merge(handlers::quiz::routes())
        .merge(handlers::tip::routes())
        .merge(handlers::session::routes())
        .nest("/static", statics::routes())
        .with_state(state)
}
