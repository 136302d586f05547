//! Home page, upload serving and health routes

use axum::{routing::get, Router};

use crate::features::pages::{handlers, PagesState};

pub fn routes(state: PagesState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/uploads/{filename}", get(handlers::serve_upload))
        .route("/health", get(handlers::health))
        .with_state(state)
}
