// src/services/widget.rs
use async_trait::async_trait;
use thiserror::Error;

use super::transcript::{Message, Transcript};
use crate::{
    config::WidgetConfig,
    message::{ChatReply, ChatRequest},
};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("chat endpoint unreachable: {0}")]
    Request(#[from] reqwest::Error),
    #[error("chat endpoint returned an unreadable body: {0}")]
    Decode(String),
}

/// Carries one chat turn to the chat endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError>;
}

/// Posts turns to a chat endpoint over HTTP. The envelope is decoded
/// whatever the status, so a 500 still yields its reply text.
#[derive(Clone, Debug)]
pub struct HttpChatTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpChatTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| TransportError::Decode(format!("status {status}: {e}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input or a turn already in flight; nothing was sent.
    Ignored,
    Replied,
    /// Transport failed and the local fallback was appended.
    Fallback,
}

/// Client-side conversation state: open flag, transcript, pending input
/// and the in-flight marker.
#[derive(Debug, Clone)]
pub struct ChatWidget {
    config: WidgetConfig,
    open: bool,
    transcript: Transcript,
    input: String,
    in_flight: bool,
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new(WidgetConfig::default())
    }
}

impl ChatWidget {
    pub fn new(config: WidgetConfig) -> Self {
        let transcript = Transcript::seeded(Message::assistant(&config.welcome));
        Self {
            config,
            open: false,
            transcript,
            input: String::new(),
            in_flight: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Flip the open flag. Opening always starts from the welcome message.
    pub fn toggle(&mut self) {
        if self.open {
            self.open = false;
        } else {
            self.open = true;
            self.transcript = Transcript::seeded(Message::assistant(&self.config.welcome));
        }
    }

    pub fn open(&mut self) {
        if !self.open {
            self.toggle();
        }
    }

    pub fn close(&mut self) {
        if self.open {
            self.toggle();
        }
    }

    /// Start a turn from the current input. Returns the request to send,
    /// or `None` when the input is blank or a turn is already pending.
    pub fn submit(&mut self) -> Option<ChatRequest> {
        if self.in_flight || self.input.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.transcript.push(Message::user(text.clone()));
        self.in_flight = true;
        Some(ChatRequest::new(text))
    }

    /// Finish the pending turn with the endpoint's answer or a transport failure.
    pub fn receive(&mut self, result: Result<ChatReply, TransportError>) -> SendOutcome {
        let outcome = match result {
            Ok(reply) => {
                self.transcript.push(Message::assistant(reply.reply));
                SendOutcome::Replied
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat turn failed");
                self.transcript
                    .push(Message::assistant(&self.config.transport_fallback));
                SendOutcome::Fallback
            }
        };
        self.in_flight = false;
        outcome
    }

    pub async fn send<T>(&mut self, transport: &T) -> SendOutcome
    where
        T: ChatTransport + ?Sized,
    {
        let Some(request) = self.submit() else {
            return SendOutcome::Ignored;
        };
        let result = transport.send(&request).await;
        self.receive(result)
    }
}
