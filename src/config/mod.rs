//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or defaults
//!     → loader.rs (parse & deserialize)
//!     → GuardConfig::apply_env (EVALS_THREAD_TIMEOUT, read once)
//!     → validation.rs (semantic checks)
//!     → RetryPolicy / BoundedExecutor injected into CompletionClient
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; per-call overrides go through the client API
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_default, ConfigError};
pub use schema::{ApiConfig, GuardConfig, ObservabilityConfig, RetryConfig, TimeoutConfig};
