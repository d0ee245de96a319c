use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CompletionError, ConfigError};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "COURSE_AI_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const MODEL: &str = "gpt-4o-mini";
pub const TEMPERATURE: f32 = 0.7;

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl GeneratorConfig {
    /// Read `OPENAI_API_KEY` and `COURSE_AI_BASE_URL` from the environment.
    ///
    /// A missing key is not an error here; generation requests fail on it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the base URL does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR).ok();
        let base_url = env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base_url, api_key)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the base URL does not parse.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().to_string();
        if Url::parse(&base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        Ok(Self { base_url, api_key })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatRequest {
    /// Request with a system instruction followed by one user message,
    /// using the fixed model and temperature.
    #[must_use]
    pub fn with_system(system: &str, user: String) -> Self {
        Self {
            model: MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
        }
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send one request and return the first choice's message content.
    ///
    /// # Errors
    ///
    /// Returns `CompletionError::Status` with the upstream body for non-2xx
    /// responses, or `CompletionError::Http` for transport failures.
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<Option<String>, CompletionError>;
}

/// `ChatCompletion` over an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.base_url.clone())
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<Option<String>, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = response.json().await?;
        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessageResponse>,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
