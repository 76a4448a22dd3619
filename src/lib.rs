//! Resilient client for remote text-completion APIs.
//!
//! Wraps a completion call with exponential-backoff retry on transient
//! failures and, for chat completions, a hard per-attempt deadline.

pub mod completion;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod resilience;

pub use completion::{CompletionApi, CompletionClient, CompletionRequest};
pub use config::GuardConfig;
pub use error::{CompletionError, CompletionResult, ErrorKind};
pub use http::HttpCompletionApi;
pub use resilience::{BackoffPolicy, BoundedExecutor, RetryPolicy};
