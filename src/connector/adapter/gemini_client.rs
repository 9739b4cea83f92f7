use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::{GenerativeClient, UpstreamReply};
use crate::domain::{ApiKey, DomainError};

use super::http::{build_http_client, post_json};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const MODEL_VAR: &str = "GEMINI_MODEL";

const API_KEY_HEADER: &str = "X-goog-api-key";

/// Where and how to reach the Gemini API.
///
/// | Variable          | Default                                     |
/// |-------------------|---------------------------------------------|
/// | `GEMINI_API_KEY`  | required                                    |
/// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` |
/// | `GEMINI_MODEL`    | `gemini-2.5-flash`                          |
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: ApiKey,
    base_url: String,
    model: String,
    timeout: Option<Duration>,
}

impl GeminiConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through `lookup`. Fails when the key is
    /// absent or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DomainError::config(format!("{API_KEY_VAR} is not defined")))?;

        let mut config = Self::new(ApiKey::new(key));
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_model(model);
        }
        Ok(config)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Calls `generateContent` directly, with the key in the `X-goog-api-key`
/// header.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
    url: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let url = config.endpoint();
        Self {
            client: build_http_client(config.timeout()),
            config,
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn forward(&self, payload: &Value) -> Result<UpstreamReply, DomainError> {
        let request = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, self.config.api_key.expose());
        post_json(request, payload, "GeminiClient").await
    }
}
