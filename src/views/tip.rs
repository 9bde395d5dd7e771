use maud::{html, Markup};

use crate::db::models::{AuthUser, Quiz, Tip};
use crate::names;

pub fn list(quiz: &Quiz, tips: &[Tip], viewer: Option<&AuthUser>) -> Markup {
    html! {
        section {
            h2 { "Tips" }
            @if tips.is_empty() {
                p { "No tips yet." }
            } @else {
                ul {
                    @for tip in tips {
                        li {
                            @if tip.accepted {
                                (tip.text)
                            } @else {
                                s { (tip.text) } " " small { "(pending)" }
                            }
                            @if let Some(author) = &tip.author_name {
                                " " small { "by " (author) }
                            }
                            @if !tip.accepted && can_manage(viewer, quiz.author_id) {
                                " "
                                form method="post"
                                     action=(names::accept_tip_url(quiz.id, tip.id)) {
                                    button type="submit" { "Accept" }
                                }
                            }
                            @if can_manage(viewer, tip.author_id) {
                                " "
                                a href=(names::edit_tip_url(quiz.id, tip.id)) { "Edit" }
                                " "
                                form method="post"
                                     action=(names::delete_tip_url(quiz.id, tip.id)) {
                                    button type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn new_form(quiz_id: i64, viewer: Option<&AuthUser>) -> Markup {
    html! {
        @if viewer.is_some() {
            form method="post" action=(names::create_tip_url(quiz_id)) {
                label {
                    "Add a tip"
                    input type="text" name="text";
                }
                button type="submit" { "Submit tip" }
            }
        } @else {
            p { a href=(names::LOGIN_URL) { "Log in" } " to suggest a tip." }
        }
    }
}

pub fn edit_form(quiz: &Quiz, tip: &Tip, error: Option<&str>) -> Markup {
    html! {
        h1 { "Edit tip" }
        p { "For quiz: " (quiz.question) }
        @if let Some(error) = error {
            aside."notice-error" { (error) }
        }
        form method="post" action=(names::edit_tip_url(quiz.id, tip.id)) {
            label {
                "Tip"
                input type="text" name="text" value=(tip.text) required;
            }
            button type="submit" { "Save" }
        }
        p { a href=(names::quiz_url(quiz.id)) { "Back to quiz" } }
    }
}

fn can_manage(viewer: Option<&AuthUser>, author_id: i64) -> bool {
    viewer.is_some_and(|u| u.is_admin || u.id == author_id)
}
