//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to remote API:
//!     → retries.rs (retry transient ErrorKinds with backoff.rs delays)
//!     → timeouts.rs (optional: per-attempt deadline on a fresh worker)
//!     → remote call
//! ```
//!
//! # Design Decisions
//! - Both retry loops default to unbounded; caps are configuration
//! - Timeout handling is absorbed by the executor and never surfaces as a
//!   retryable `Timeout`
//! - All resilience logic is composable around any async call

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use backoff::{BackoffPolicy, Jitter};
pub use retries::{is_retryable, RetryPolicy};
pub use timeouts::BoundedExecutor;
