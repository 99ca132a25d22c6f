// Shared fakes for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Form, Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use nitsat_backend::{
    config::{AssistantConfig, ProviderConfig},
    message::ChatReply,
    routes::create_router,
    services::{
        assistant::Assistant,
        completion::{CompletionError, CompletionService},
        contact::ContactService,
    },
    state::{AppState, SharedState},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::util::ServiceExt;

/// Replies with the user message unchanged.
pub struct Echo;

#[async_trait]
impl CompletionService for Echo {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, CompletionError> {
        Ok(user.to_string())
    }
}

/// Fails like a provider answering 500.
pub struct Failing;

#[async_trait]
impl CompletionService for Failing {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "upstream exploded: quota key sk-leak".to_string(),
        })
    }
}

pub fn state_with(completion: Arc<dyn CompletionService>) -> SharedState {
    Arc::new(AppState::new(
        Assistant::new(completion, AssistantConfig::default()),
        ContactService::default(),
    ))
}

pub async fn post_json(state: SharedState, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let app = create_router().with_state(state);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn post_chat(state: SharedState, body: &str) -> (StatusCode, ChatReply) {
    let (status, value) = post_json(state, "/chat", body.to_string()).await;
    (status, serde_json::from_value(value).unwrap())
}

/// Bind `app` on an ephemeral local port and return its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Clone, Copy, Debug)]
pub enum ProviderMode {
    Echo,
    ServerError,
    Garbage,
    NullContent,
    EmptyContent,
}

#[derive(Clone)]
pub struct MockProvider {
    pub mode: ProviderMode,
    pub seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl MockProvider {
    pub fn new(mode: ProviderMode) -> Self {
        Self {
            mode,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Start the fake provider; returns a config pointing at it.
    pub async fn start(&self) -> ProviderConfig {
        let app = Router::new()
            .route("/v1/chat/completions", post(provider_handler))
            .with_state(self.clone());
        let base = spawn_server(app).await;
        ProviderConfig {
            api_key: Some("sk-test".to_string()),
            base_url: format!("{base}/v1"),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<(Option<String>, Value)> {
        self.seen.lock().unwrap().clone()
    }
}

async fn provider_handler(
    State(mock): State<MockProvider>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    mock.seen.lock().unwrap().push((auth, body.clone()));

    match mock.mode {
        ProviderMode::Echo => {
            let user = body["messages"][1]["content"].as_str().unwrap_or_default();
            Json(json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": user },
                    "finish_reason": "stop"
                }]
            }))
            .into_response()
        }
        ProviderMode::ServerError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "message": "internal provider failure" } })),
        )
            .into_response(),
        ProviderMode::Garbage => (StatusCode::OK, "not json at all").into_response(),
        ProviderMode::NullContent => Json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": null } }]
        }))
        .into_response(),
        ProviderMode::EmptyContent => Json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "" } }]
        }))
        .into_response(),
    }
}

/// Fake siteverify endpoint accepting exactly one token.
pub async fn spawn_recaptcha(valid_token: &'static str) -> String {
    let app = Router::new().route(
        "/siteverify",
        post(move |Form(form): Form<Vec<(String, String)>>| async move {
            let ok = form
                .iter()
                .any(|(k, v)| k == "response" && v == valid_token);
            Json(json!({ "success": ok }))
        }),
    );
    format!("{}/siteverify", spawn_server(app).await)
}
