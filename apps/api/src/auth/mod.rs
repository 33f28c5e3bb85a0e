//! Login, logout and the session-scoped landing endpoint.
//!
//! The session is a signed cookie holding the student identifier, so the
//! server keeps no per-user state.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::routes::pages;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "bloom_session";

#[derive(Deserialize)]
pub struct LoginForm {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MainResponse {
    pub user_id: String,
    /// Display name from the marks table, if this login also has marks.
    pub name: Option<String>,
    pub analysis_url: String,
}

fn session_cookie(user_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, user_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Identifier of the logged-in student, if the request carries a valid session.
pub fn session_user(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// GET /login
pub async fn handle_login_page() -> Html<String> {
    Html(pages::login(None))
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let user_id = form.user_id.as_str();

    if !state.store.authenticate(user_id, &form.password) {
        warn!("Failed login for '{user_id}'");
        let message = AppError::InvalidCredential.to_string();
        return (StatusCode::UNAUTHORIZED, Html(pages::login(Some(&message)))).into_response();
    }

    info!("Login for '{user_id}'");
    let jar = jar.add(session_cookie(user_id.to_string()));
    (jar, Redirect::to("/main")).into_response()
}

/// GET /logout
pub async fn handle_logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/login"))
}

/// GET /main
pub async fn handle_main(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let Some(user_id) = session_user(&jar) else {
        return Redirect::to("/login").into_response();
    };

    let name = state.store.marks_for(&user_id).map(|r| r.name.clone());
    Json(MainResponse {
        analysis_url: format!("/analysis/{user_id}"),
        user_id,
        name,
    })
    .into_response()
}
