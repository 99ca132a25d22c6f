// src/config.rs
use std::{
    env,
    net::SocketAddr,
    path::PathBuf,
    time::Duration,
};

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Fixed texts used by the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub system_prompt: String,
    pub missing_message_reply: String,
    pub fallback_reply: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_prompt: "You are Nitsat AI Assistant. Help users professionally with services and general queries.".to_string(),
            missing_message_reply: "Message missing".to_string(),
            fallback_reply: "AI service temporarily unavailable.".to_string(),
        }
    }
}

/// Fixed texts used by the chat widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub welcome: String,
    pub transport_fallback: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            welcome: "👋 Welcome to Nitsat AI Assistant! How can I help you today?".to_string(),
            transport_fallback: "Something went wrong. Please try again.".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecaptchaConfig {
    pub secret: String,
    pub verify_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub provider: ProviderConfig,
    pub assistant: AssistantConfig,
    pub contacts_file: Option<PathBuf>,
    pub recaptcha: Option<RecaptchaConfig>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            var: "BIND_ADDR",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let timeout = match get("OPENAI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                    var: "OPENAI_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let provider = ProviderConfig {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            timeout,
        };

        let recaptcha = get("RECAPTCHA_SECRET").map(|secret| RecaptchaConfig {
            secret,
            verify_url: get("RECAPTCHA_VERIFY_URL")
                .unwrap_or_else(|| DEFAULT_RECAPTCHA_VERIFY_URL.to_string()),
        });

        Ok(Self {
            bind_addr,
            static_dir: PathBuf::from(get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())),
            provider,
            assistant: AssistantConfig::default(),
            contacts_file: get("CONTACTS_FILE").map(PathBuf::from),
            recaptcha,
        })
    }
}
