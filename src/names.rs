pub const QUIZZES_URL: &str = "/quizzes";
pub const NEW_QUIZ_URL: &str = "/quizzes/new";
pub const RANDOM_PLAY_URL: &str = "/quizzes/randomplay";
pub const LOGIN_URL: &str = "/login";
pub const LOGOUT_URL: &str = "/logout";
pub const REGISTER_URL: &str = "/register";

pub const USER_SESSION_COOKIE_NAME: &str = "user_session";
pub const PLAY_COOKIE_NAME: &str = "random_play";

pub const ITEMS_PER_PAGE: i64 = 10;

pub fn quiz_url(quiz_id: i64) -> String {
    format!("/quizzes/{quiz_id}")
}

pub fn edit_quiz_url(quiz_id: i64) -> String {
    format!("/quizzes/{quiz_id}/edit")
}

pub fn delete_quiz_url(quiz_id: i64) -> String {
    format!("/quizzes/{quiz_id}/delete")
}

pub fn play_quiz_url(quiz_id: i64) -> String {
    format!("/quizzes/{quiz_id}/play")
}

pub fn check_quiz_url(quiz_id: i64) -> String {
    format!("/quizzes/{quiz_id}/check")
}

pub fn random_check_url(quiz_id: i64) -> String {
    format!("/quizzes/randomcheck/{quiz_id}")
}

pub fn user_quizzes_url(user_id: i64) -> String {
    format!("/users/{user_id}/quizzes")
}

pub fn create_tip_url(quiz_id: i64) -> String {
    format!("/quizzes/{quiz_id}/tips")
}

pub fn accept_tip_url(quiz_id: i64, tip_id: i64) -> String {
    format!("/quizzes/{quiz_id}/tips/{tip_id}/accept")
}

pub fn edit_tip_url(quiz_id: i64, tip_id: i64) -> String {
    format!("/quizzes/{quiz_id}/tips/{tip_id}/edit")
}

pub fn delete_tip_url(quiz_id: i64, tip_id: i64) -> String {
    format!("/quizzes/{quiz_id}/tips/{tip_id}/delete")
}
