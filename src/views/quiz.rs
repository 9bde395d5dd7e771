use maud::{html, Markup};

use crate::db::models::{AuthUser, Quiz, Tip};
use crate::names;
use crate::views::{components, tip as tip_views};

pub fn index(
    title: &str,
    quizzes: &[Quiz],
    search: &str,
    notice_code: &str,
    pagination: Markup,
    viewer: Option<&AuthUser>,
) -> Markup {
    html! {
        h1 { (title) }
        (components::notice(notice_code))

        form method="get" action=(names::QUIZZES_URL) role="search" {
            input type="search" name="search" value=(search) placeholder="Search questions";
            button type="submit" { "Search" }
        }

        @if quizzes.is_empty() {
            p { "There are no quizzes." }
        } @else {
            table {
                tbody {
                    @for quiz in quizzes {
                        tr {
                            td { a href=(names::quiz_url(quiz.id)) { (quiz.question) } }
                            td {
                                @if let Some(author) = &quiz.author_name {
                                    small { "by " (author) }
                                }
                            }
                            td { a href=(names::play_quiz_url(quiz.id)) { "Play" } }
                            @if can_manage(viewer, quiz.author_id) {
                                td { a href=(names::edit_quiz_url(quiz.id)) { "Edit" } }
                                td { (delete_button(&names::delete_quiz_url(quiz.id))) }
                            }
                        }
                    }
                }
            }
        }

        (pagination)
    }
}

pub fn show(quiz: &Quiz, tips: &[Tip], notice_code: &str, viewer: Option<&AuthUser>) -> Markup {
    html! {
        (components::notice(notice_code))
        article {
            header { h1 { (quiz.question) } }
            p { "Answer: " strong { (quiz.answer) } }
            @if let Some(author) = &quiz.author_name {
                p { small { "by " (author) } }
            }
            footer {
                a href=(names::play_quiz_url(quiz.id)) role="button" { "Play" }
                @if can_manage(viewer, quiz.author_id) {
                    " "
                    a href=(names::edit_quiz_url(quiz.id)) { "Edit" }
                    " "
                    (delete_button(&names::delete_quiz_url(quiz.id)))
                }
            }
        }

        (tip_views::list(quiz, tips, viewer))
        (tip_views::new_form(quiz.id, viewer))
    }
}

/// Shared form body for both the new and edit pages.
pub fn form(
    heading: &str,
    action: &str,
    question: &str,
    answer: &str,
    error: Option<&str>,
) -> Markup {
    html! {
        h1 { (heading) }
        @if let Some(error) = error {
            aside."notice-error" { (error) }
        }
        form method="post" action=(action) {
            label {
                "Question"
                input type="text" name="question" value=(question) required;
            }
            label {
                "Answer"
                input type="text" name="answer" value=(answer) required;
            }
            button type="submit" { "Save" }
        }
        p { a href=(names::QUIZZES_URL) { "Back to quizzes" } }
    }
}

pub fn play(quiz: &Quiz, answer: &str) -> Markup {
    html! {
        h1 { (quiz.question) }
        form method="get" action=(names::check_quiz_url(quiz.id)) {
            label {
                "Your answer"
                input type="text" name="answer" value=(answer) autofocus;
            }
            button type="submit" { "Check" }
        }
    }
}

pub fn check_result(quiz: &Quiz, answer: &str, correct: bool) -> Markup {
    html! {
        h1 { (quiz.question) }
        @if correct {
            p."result-correct" { "Yes, \"" (answer) "\" is the correct answer!" }
        } @else {
            p."result-wrong" { "No, \"" (answer) "\" is not the correct answer." }
        }
        p {
            a href=(names::play_quiz_url(quiz.id)) { "Try again" }
            " | "
            a href=(names::QUIZZES_URL) { "Back to quizzes" }
        }
    }
}

pub fn random_play(quiz: &Quiz, score: usize) -> Markup {
    html! {
        h1 { "Random play" }
        p { "Score so far: " strong { (score) } }
        article {
            header { h2 { (quiz.question) } }
            form method="get" action=(names::random_check_url(quiz.id)) {
                label {
                    "Your answer"
                    input type="text" name="answer" autofocus;
                }
                button type="submit" { "Check" }
            }
        }
    }
}

pub fn random_result(answer: &str, correct: bool, score: usize) -> Markup {
    html! {
        h1 { "Random play" }
        @if correct {
            p."result-correct" { "Correct! \"" (answer) "\" is right." }
            p { "Score: " strong { (score) } }
            p { a href=(names::RANDOM_PLAY_URL) role="button" { "Next question" } }
        } @else {
            p."result-wrong" { "Wrong, \"" (answer) "\" is not the answer. The round is over." }
            p { "Final score: " strong { (score) } }
            p { a href=(names::RANDOM_PLAY_URL) role="button" { "Play again" } }
        }
    }
}

pub fn random_nomore(score: usize) -> Markup {
    html! {
        h1 { "No more questions!" }
        p { "You answered every quiz correctly. Final score: " strong { (score) } }
        p { a href=(names::RANDOM_PLAY_URL) role="button" { "Start a new round" } }
    }
}

pub fn random_empty() -> Markup {
    html! {
        h1 { "Random play" }
        p { "There are no questions to play yet." }
        p { a href=(names::QUIZZES_URL) { "Back to quizzes" } }
    }
}

fn can_manage(viewer: Option<&AuthUser>, author_id: i64) -> bool {
    viewer.is_some_and(|u| u.is_admin || u.id == author_id)
}

fn delete_button(action: &str) -> Markup {
    html! {
        form method="post" action=(action) {
            button type="submit" { "Delete" }
        }
    }
}
