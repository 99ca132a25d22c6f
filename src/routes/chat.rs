use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    message::{ChatReply, ChatRequest},
    state::SharedState,
};

/// Always answers with a reply envelope. A body that cannot be decoded gets
/// the same fallback as an upstream failure.
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatReply>) {
    let (status, reply) = match payload {
        Ok(Json(request)) => state.assistant.respond(request.message.as_deref()).await,
        Err(rejection) => {
            tracing::error!(error = %rejection.body_text(), "unreadable chat request");
            state.assistant.fallback()
        }
    };
    (status, Json(reply))
}
