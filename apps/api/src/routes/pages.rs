//! Static informational pages and the login form.

use axum::response::Html;

const LANDING: &str = include_str!("../../pages/index.html");
const ABOUT_US: &str = include_str!("../../pages/about_us.html");
const CONTACT_US: &str = include_str!("../../pages/contact_us.html");
const MORE_TO_KNOW: &str = include_str!("../../pages/more_to_know.html");
const CHAT_WITH_SENIOR: &str = include_str!("../../pages/chat_with_senior.html");
const FEEDBACK: &str = include_str!("../../pages/feedback.html");
const LOGIN: &str = include_str!("../../pages/login.html");

/// Marker in login.html replaced by the error paragraph.
const LOGIN_ERROR_SLOT: &str = "<!-- login-error -->";

/// Login form, optionally with an error message above it.
/// `error` is always one of our own fixed messages, never user input.
pub fn login(error: Option<&str>) -> String {
    match error {
        Some(message) => {
            LOGIN.replace(LOGIN_ERROR_SLOT, &format!(r#"<p class="error">{message}</p>"#))
        }
        None => LOGIN.to_string(),
    }
}

pub async fn landing() -> Html<&'static str> {
    Html(LANDING)
}

pub async fn about_us() -> Html<&'static str> {
    Html(ABOUT_US)
}

pub async fn contact_us() -> Html<&'static str> {
    Html(CONTACT_US)
}

pub async fn more_to_know() -> Html<&'static str> {
    Html(MORE_TO_KNOW)
}

pub async fn chat_with_senior() -> Html<&'static str> {
    Html(CHAT_WITH_SENIOR)
}

pub async fn feedback() -> Html<&'static str> {
    Html(FEEDBACK)
}
