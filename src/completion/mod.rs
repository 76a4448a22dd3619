//! Completion subsystem.
//!
//! # Data Flow
//! ```text
//! caller
//!     → client.rs (CompletionClient: retry policy, call_id span)
//!     → [chat only] BoundedExecutor (per-attempt deadline)
//!     → api.rs (CompletionApi implementation, e.g. http::HttpCompletionApi)
//!     → response.rs (embedded "error" → CompletionError::Api)
//!     → back to client.rs for retry or return
//! ```

pub mod api;
pub mod client;
pub mod response;

pub use api::{ApiFuture, CompletionApi, CompletionRequest};
pub use client::CompletionClient;
pub use response::{embedded_error, reclassify};
