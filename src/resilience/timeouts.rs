//! Bounded-time call execution.
//!
//! # Responsibilities
//! - Run each attempt on its own worker task
//! - Wait for it with a hard wall-clock deadline
//! - On elapse, abandon the attempt and start a fresh one with the same deadline
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Abandoned attempts are detached, not aborted: a blocking or in-flight
//!   request keeps running until it returns on its own and its result is
//!   dropped. Callers that cannot afford the leaked work should set
//!   `max_attempts`
//! - Errors returned by the callable are never retried here
//! - Hitting the attempt cap yields `DeadlineExceeded`, which is fatal, so an
//!   executor-side timeout never reaches the backoff layer as `Timeout`

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::error::{CompletionError, CompletionResult};
use crate::observability::metrics;

/// Runs calls under a per-attempt deadline, retrying on elapse.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedExecutor {
    /// Deadline for a single attempt.
    pub timeout: Duration,
    /// Maximum attempts before giving up. `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl BoundedExecutor {
    /// Create an unbounded executor with the given per-attempt deadline.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            max_attempts: None,
        }
    }

    /// Cap the number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Same executor with a different per-attempt deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            max_attempts: self.max_attempts,
        }
    }

    /// Run an async call, one spawned task per attempt.
    ///
    /// `make_attempt` is invoked once per attempt and must produce a fresh
    /// future each time.
    pub async fn run<F, Fut, T>(&self, mut make_attempt: F) -> CompletionResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CompletionResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.drive(|| tokio::spawn(make_attempt().in_current_span())).await
    }

    /// Run a synchronous call on the blocking pool, one thread per attempt.
    pub async fn run_blocking<F, T>(&self, callable: F) -> CompletionResult<T>
    where
        F: Fn() -> CompletionResult<T> + Send + Sync + 'static,
        T: Send + 'static,
    {
        let callable = Arc::new(callable);
        self.drive(|| {
            let callable = Arc::clone(&callable);
            let span = tracing::Span::current();
            tokio::task::spawn_blocking(move || span.in_scope(|| callable()))
        })
        .await
    }

    async fn drive<S, T>(&self, mut spawn: S) -> CompletionResult<T>
    where
        S: FnMut() -> JoinHandle<CompletionResult<T>>,
    {
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            let worker = spawn();

            match tokio::time::timeout(self.timeout, worker).await {
                Ok(Ok(result)) => return result,
                Ok(Err(e)) => return Err(CompletionError::WorkerPanicked(e.to_string())),
                Err(_) => {
                    // Dropping the JoinHandle detaches the worker.
                    metrics::record_timeout();
                    tracing::warn!(
                        attempt = attempts,
                        timeout = ?self.timeout,
                        "Attempt exceeded deadline, abandoning worker"
                    );

                    if let Some(max) = self.max_attempts {
                        if attempts >= max {
                            return Err(CompletionError::DeadlineExceeded {
                                attempts,
                                timeout: self.timeout,
                            });
                        }
                    }
                }
            }
        }
    }
}
