// src/routes/mod.rs
pub mod chat;
pub mod contact;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::chat_handler;
use contact::contact_handler;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/api/chat", post(chat_handler))
        .route("/contact", post(contact_handler))
        .route("/api/contact", post(contact_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}

/// Full site: API routes plus the static pages under `static_dir`.
pub fn create_app(state: SharedState, static_dir: impl AsRef<Path>) -> Router {
    create_router()
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
}
