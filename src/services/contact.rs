// src/services/contact.rs
use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use uuid::Uuid;

use crate::{
    config::RecaptchaConfig,
    error::AppError,
    message::{ContactRequest, ContactResponse},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, record: &ContactRecord) -> anyhow::Result<()>;
}

/// Appends one JSON object per line.
#[derive(Debug, Clone)]
pub struct JsonlContactStore {
    path: PathBuf,
}

impl JsonlContactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load_all(&self) -> anyhow::Result<Vec<ContactRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Ok(serde_json::from_str(line)?))
            .collect()
    }
}

#[async_trait]
impl ContactStore for JsonlContactStore {
    async fn insert(&self, record: &ContactRecord) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
}

/// Checks CAPTCHA tokens against a siteverify-style endpoint.
#[derive(Clone)]
pub struct RecaptchaVerifier {
    http: reqwest::Client,
    config: RecaptchaConfig,
}

impl RecaptchaVerifier {
    pub fn new(config: RecaptchaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub async fn verify(&self, token: &str) -> anyhow::Result<bool> {
        let response = self
            .http
            .post(&self.config.verify_url)
            .form(&[("secret", self.config.secret.as_str()), ("response", token)])
            .send()
            .await?
            .error_for_status()?;
        let body: VerifyResponse = response.json().await?;
        Ok(body.success)
    }
}

/// Validates, optionally verifies, and stores contact form submissions.
#[derive(Clone, Default)]
pub struct ContactService {
    store: Option<Arc<dyn ContactStore>>,
    verifier: Option<RecaptchaVerifier>,
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ContactService {
    pub fn new(store: Option<Arc<dyn ContactStore>>, verifier: Option<RecaptchaVerifier>) -> Self {
        Self { store, verifier }
    }

    pub async fn submit(&self, request: ContactRequest) -> Result<ContactResponse, AppError> {
        let (Some(name), Some(email), Some(message)) = (
            required(&request.name),
            required(&request.email),
            required(&request.message),
        ) else {
            return Err(AppError::BadRequest(
                "Name, email, and message are required".to_string(),
            ));
        };
        let phone = required(&request.phone).map(str::to_string);

        if let Some(verifier) = &self.verifier {
            let token = required(&request.recaptcha_token).ok_or(AppError::Captcha)?;
            let ok = verifier
                .verify(token)
                .await
                .map_err(|e| AppError::internal("Internal server error", e))?;
            if !ok {
                return Err(AppError::Captcha);
            }
        }

        let Some(store) = &self.store else {
            tracing::info!(name, email, ?phone, "contact submission received (store not configured)");
            return Ok(ContactResponse {
                message: "Message received! (Database not configured yet)".to_string(),
                data: json!({ "name": name, "email": email, "phone": phone, "message": message }),
            });
        };

        let record = ContactRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            phone,
            message: message.to_string(),
            created_at: Utc::now(),
        };
        store
            .insert(&record)
            .await
            .map_err(|e| AppError::internal("Failed to save contact", e))?;

        tracing::info!(id = %record.id, "contact saved");
        Ok(ContactResponse {
            message: "Contact saved successfully".to_string(),
            data: json!([record]),
        })
    }
}
