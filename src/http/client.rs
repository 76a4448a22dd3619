//! HTTP implementation of `CompletionApi` for OpenAI-compatible endpoints.
//!
//! # Responsibilities
//! - POST requests verbatim to `/completions` and `/chat/completions`
//! - Attach bearer auth when a key is configured
//! - Map transport and status failures through `classify`
//!
//! A 2xx body carrying an `"error"` member is returned as-is; the
//! completion client decides what to do with it.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::completion::api::{ApiFuture, CompletionApi, CompletionRequest};
use crate::config::ApiConfig;
use crate::error::{CompletionError, CompletionResult};
use crate::http::classify;

/// reqwest-backed completion API.
#[derive(Debug, Clone)]
pub struct HttpCompletionApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpCompletionApi {
    /// Create an API client with default transport settings.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Create an API client around a preconfigured `reqwest::Client`.
    pub fn with_client(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Build from configuration, reading the key from `api_key_env`.
    pub fn from_config(config: &ApiConfig) -> CompletionResult<Self> {
        let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!(
                var = %config.api_key_env,
                "API key variable not set, sending unauthenticated requests"
            );
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(CompletionError::fatal)?;

        Ok(Self::with_client(client, config.base_url.clone(), api_key))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, path: &'static str, request: CompletionRequest) -> ApiFuture {
        let client = self.client.clone();
        let url = format!("{}/{}", self.base_url, path);
        let api_key = self.api_key.clone();

        Box::pin(async move {
            tracing::debug!(url = %url, "Sending completion request");

            let mut builder = client.post(&url).json(&request);
            if let Some(key) = api_key {
                builder = builder.bearer_auth(key);
            }

            let response = builder.send().await.map_err(classify::from_transport)?;
            let status = response.status();
            let body = response.text().await.map_err(classify::from_transport)?;

            if !status.is_success() {
                let err = classify::from_status(status, &body);
                tracing::debug!(url = %url, status = %status, error = %err, "Upstream returned an error status");
                return Err(err);
            }

            serde_json::from_str::<Value>(&body).map_err(|e| CompletionError::Decode(e.to_string()))
        })
    }
}

impl CompletionApi for HttpCompletionApi {
    fn create_completion(&self, request: CompletionRequest) -> ApiFuture {
        self.post("completions", request)
    }

    fn create_chat_completion(&self, request: CompletionRequest) -> ApiFuture {
        self.post("chat/completions", request)
    }
}
