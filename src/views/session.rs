use maud::{html, Markup};

use crate::names;

pub fn login(error: Option<&str>) -> Markup {
    html! {
        h1 { "Log in" }
        @if let Some(error) = error {
            aside."notice-error" { (error) }
        }
        form method="post" action=(names::LOGIN_URL) {
            label {
                "Username"
                input type="text" name="username" required autofocus;
            }
            label {
                "Password"
                input type="password" name="password" required;
            }
            button type="submit" { "Log in" }
        }
        p { "No account yet? " a href=(names::REGISTER_URL) { "Register" } }
    }
}

pub fn register(username: &str, error: Option<&str>) -> Markup {
    html! {
        h1 { "Register" }
        @if let Some(error) = error {
            aside."notice-error" { (error) }
        }
        form method="post" action=(names::REGISTER_URL) {
            label {
                "Username"
                input type="text" name="username" value=(username) required autofocus;
            }
            label {
                "Password"
                input type="password" name="password" required;
            }
            button type="submit" { "Register" }
        }
        p { "Already registered? " a href=(names::LOGIN_URL) { "Log in" } }
    }
}
