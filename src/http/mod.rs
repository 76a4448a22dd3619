//! HTTP adapter subsystem.
//!
//! # Data Flow
//! ```text
//! CompletionClient
//!     → client.rs (HttpCompletionApi, reqwest POST)
//!     → remote API
//!     → classify.rs (status / transport failure → CompletionError)
//! ```
//!
//! # Design Decisions
//! - The retry policy only sees `ErrorKind`; reqwest types stop here
//! - 4xx other than 408/429 are fatal

pub mod classify;
pub mod client;

pub use client::HttpCompletionApi;
