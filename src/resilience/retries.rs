//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether a failure is retryable (fixed `ErrorKind` set only)
//! - Execute retries with exponential backoff
//! - Enforce an optional attempt cap
//!
//! # State Machine (per call)
//! ```text
//! Idle → Attempting
//! Attempting → Success                        (terminal)
//! Attempting → FatalFailure                   (terminal, error returned unchanged)
//! Attempting → RetryableFailure → Attempting  (after backoff delay)
//! ```
//!
//! # Design Decisions
//! - Unbounded by default: availability over bounded latency
//! - Attempts are strictly sequential; the next starts only after the delay

use std::future::Future;

use crate::error::{CompletionError, CompletionResult};
use crate::observability::metrics;
use crate::resilience::backoff::BackoffPolicy;

/// True if the error belongs to the retryable transient set.
pub fn is_retryable(err: &CompletionError) -> bool {
    err.is_retryable()
}

/// Backoff retry policy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RetryPolicy {
    pub backoff: BackoffPolicy,
    /// Maximum attempts including the first. `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Cap the number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Run `op` until it succeeds or fails with a non-retryable error.
    ///
    /// `operation` labels logs and metrics.
    pub async fn retry<F, Fut, T>(&self, operation: &'static str, mut op: F) -> CompletionResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CompletionResult<T>>,
    {
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            metrics::record_attempt(operation);

            let err = match op().await {
                Ok(value) => {
                    if attempts > 1 {
                        tracing::info!(operation, attempts, "Call succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(e) => e,
            };

            let Some(kind) = err.kind() else {
                tracing::error!(operation, attempt = attempts, error = %err, "Non-retryable failure");
                return Err(err);
            };

            if let Some(max) = self.max_attempts {
                if attempts >= max {
                    tracing::warn!(operation, attempts, error = %err, "Retry attempts exhausted");
                    return Err(CompletionError::RetriesExhausted {
                        attempts,
                        last: Box::new(err),
                    });
                }
            }

            let delay = self.backoff.delay(attempts - 1);
            metrics::record_retry(operation, kind.as_str());
            tracing::info!(
                operation,
                attempt = attempts,
                kind = %kind,
                delay = ?delay,
                error = %err,
                "Retrying after transient failure"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
