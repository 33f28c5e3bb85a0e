pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analysis;
use crate::auth;
use crate::directory;
use crate::errors::AppError;
use crate::state::AppState;

// TODO: persist feedback once there is somewhere to store it.
async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Static pages
        .route("/", get(pages::landing))
        .route("/about_us", get(pages::about_us))
        .route("/contact_us", get(pages::contact_us))
        .route("/more_to_know", get(pages::more_to_know))
        .route("/chat_with_senior", get(pages::chat_with_senior))
        .route("/feedback", get(pages::feedback))
        // Session
        .route(
            "/login",
            get(auth::handle_login_page).post(auth::handle_login),
        )
        .route("/logout", get(auth::handle_logout))
        .route("/main", get(auth::handle_main))
        // Analysis
        .route(
            "/analysis/:user_id",
            get(handle_analysis).post(handle_analysis),
        )
        // Skill directory
        .route("/skills", get(directory::handle_skills))
        .route("/show_names", post(directory::handle_show_names))
        .route("/submit_feedback", post(not_implemented))
        .with_state(state)
}
