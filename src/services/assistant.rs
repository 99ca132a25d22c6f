// src/services/assistant.rs
use std::sync::Arc;

use axum::http::StatusCode;

use super::completion::CompletionService;
use crate::{config::AssistantConfig, message::ChatReply};

/// Stateless chat turn handler: validates, asks the completion service,
/// and maps every outcome onto a reply envelope.
#[derive(Clone)]
pub struct Assistant {
    completion: Arc<dyn CompletionService>,
    config: AssistantConfig,
}

impl Assistant {
    pub fn new(completion: Arc<dyn CompletionService>, config: AssistantConfig) -> Self {
        Self { completion, config }
    }

    pub async fn respond(&self, message: Option<&str>) -> (StatusCode, ChatReply) {
        // Blank is checked on the trimmed text; the provider sees the message as sent.
        let Some(message) = message.filter(|m| !m.trim().is_empty()) else {
            return (StatusCode::OK, ChatReply::new(&self.config.missing_message_reply));
        };

        match self.completion.complete(&self.config.system_prompt, message).await {
            Ok(text) => (StatusCode::OK, ChatReply::new(text)),
            Err(err) => {
                tracing::error!(error = %err, "completion request failed");
                self.fallback()
            }
        }
    }

    /// Envelope used whenever the turn cannot be answered.
    pub fn fallback(&self) -> (StatusCode, ChatReply) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ChatReply::new(&self.config.fallback_reply),
        )
    }
}
