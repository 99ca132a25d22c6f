// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    assistant::Assistant,
    completion::{CompletionError, CompletionService, OpenAiClient},
    contact::{ContactService, ContactStore, JsonlContactStore, RecaptchaVerifier},
};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub assistant: Assistant,
    pub contacts: ContactService,
}

impl AppState {
    pub fn new(assistant: Assistant, contacts: ContactService) -> Self {
        Self { assistant, contacts }
    }

    /// Wire the production services described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, CompletionError> {
        let completion: Arc<dyn CompletionService> = Arc::new(OpenAiClient::new(&config.provider)?);
        let store = config
            .contacts_file
            .as_ref()
            .map(|path| Arc::new(JsonlContactStore::new(path)) as Arc<dyn ContactStore>);
        let verifier = config.recaptcha.clone().map(RecaptchaVerifier::new);

        Ok(Self {
            assistant: Assistant::new(completion, config.assistant.clone()),
            contacts: ContactService::new(store, verifier),
        })
    }
}
