use maud::{html, Markup, DOCTYPE};

use crate::db::models::AuthUser;
use crate::{names, utils};

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="/static/index.css";
    }
}

fn icon() -> Markup {
    html! {
        link rel="icon" href="/static/img/icon.svg" type="image/svg+xml" {}
    }
}

fn header(user: Option<&AuthUser>) -> Markup {
    html! {
        header {
            nav {
                ul {
                    li {
                        a href=(names::QUIZZES_URL) {
                            strong { "Quizweb" }
                        }
                    }
                    li { a href=(names::QUIZZES_URL) { "Quizzes" } }
                    li { a href=(names::RANDOM_PLAY_URL) { "Random play" } }
                    @if user.is_some() {
                        li { a href=(names::NEW_QUIZ_URL) { "New quiz" } }
                    }
                }
                ul {
                    @match user {
                        Some(user) => {
                            li {
                                a href=(names::user_quizzes_url(user.id)) { (user.username) }
                            }
                            li {
                                form method="post" action=(names::LOGOUT_URL) {
                                    button type="submit" { "Log out" }
                                }
                            }
                        }
                        None => {
                            li { a href=(names::LOGIN_URL) { "Log in" } }
                            li { a href=(names::REGISTER_URL) { "Register" } }
                        }
                    }
                    li."version" { (utils::VERSION) }
                }
            }
        }
    }
}

fn main(body: Markup) -> Markup {
    html! {
        main { (body) }
    }
}

pub fn page(title: &str, user: Option<&AuthUser>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())
            (icon())

            title { (format!("{title} - Quizweb")) }
        }

        body."container" {
            (header(user))
            (main(body))
        }
    }
}
