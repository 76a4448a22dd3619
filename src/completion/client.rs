//! Retrying completion client.
//!
//! # Responsibilities
//! - `completion`: call the API directly under the backoff policy
//! - `chat_completion`: route each attempt through the bounded executor first
//! - Reclassify embedded-error responses so they are retried, never returned
//!
//! # Design Decisions
//! - One policy for both variants; only the executor hop differs
//! - Each logical call gets a UUID `call_id` span so retries correlate in logs

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::completion::api::{CompletionApi, CompletionRequest};
use crate::completion::response::reclassify;
use crate::config::GuardConfig;
use crate::error::CompletionResult;
use crate::resilience::retries::RetryPolicy;
use crate::resilience::timeouts::BoundedExecutor;

const COMPLETION: &str = "completion";
const CHAT_COMPLETION: &str = "chat_completion";

/// Completion API wrapped with retry, backoff, and a per-attempt deadline.
pub struct CompletionClient<A> {
    api: Arc<A>,
    retry: RetryPolicy,
    executor: BoundedExecutor,
}

impl<A> Clone for CompletionClient<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            retry: self.retry.clone(),
            executor: self.executor.clone(),
        }
    }
}

impl<A: CompletionApi> CompletionClient<A> {
    pub fn new(api: A, retry: RetryPolicy, executor: BoundedExecutor) -> Self {
        Self {
            api: Arc::new(api),
            retry,
            executor,
        }
    }

    /// Build a client from validated configuration.
    pub fn from_config(api: A, config: &GuardConfig) -> Self {
        Self::new(api, config.retries.policy(), config.timeouts.executor())
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Default per-attempt deadline of the chat variant.
    pub fn default_timeout(&self) -> Duration {
        self.executor.timeout
    }

    /// Create a completion, retrying transient failures.
    pub async fn completion(&self, request: CompletionRequest) -> CompletionResult<Value> {
        let span = tracing::info_span!("completion", call_id = %Uuid::new_v4());
        let api = &self.api;
        let request = &request;

        self.retry
            .retry(COMPLETION, move || async move {
                let response = api.create_completion(request.clone()).await?;
                reclassify(COMPLETION, response)
            })
            .instrument(span)
            .await
    }

    /// Create a chat completion under the configured per-attempt deadline.
    pub async fn chat_completion(&self, request: CompletionRequest) -> CompletionResult<Value> {
        self.chat_completion_with_timeout(request, self.executor.timeout).await
    }

    /// Create a chat completion with a per-call deadline override.
    pub async fn chat_completion_with_timeout(
        &self,
        request: CompletionRequest,
        timeout: Duration,
    ) -> CompletionResult<Value> {
        let span = tracing::info_span!(
            "chat_completion",
            call_id = %Uuid::new_v4(),
            timeout = ?timeout
        );
        let executor = self.executor.with_timeout(timeout);
        let executor = &executor;
        let api = &self.api;
        let request = &request;

        self.retry
            .retry(CHAT_COMPLETION, move || async move {
                let response = executor
                    .run(|| api.create_chat_completion(request.clone()))
                    .await?;
                reclassify(CHAT_COMPLETION, response)
            })
            .instrument(span)
            .await
    }
}
