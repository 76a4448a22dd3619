//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default, so an empty file yields the stock behavior.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::validation::ValidationError;
use crate::resilience::backoff::{BackoffPolicy, Jitter};
use crate::resilience::retries::RetryPolicy;
use crate::resilience::timeouts::BoundedExecutor;

/// Environment variable overriding the bounded-call timeout, in seconds.
pub const TIMEOUT_ENV_VAR: &str = "EVALS_THREAD_TIMEOUT";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GuardConfig {
    /// Remote API endpoint settings.
    pub api: ApiConfig,

    /// Backoff retry settings.
    pub retries: RetryConfig,

    /// Bounded-time executor settings.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl GuardConfig {
    /// Apply process environment overrides.
    ///
    /// Meant to be called once at startup; components receive the result.
    pub fn apply_env(&mut self) -> Result<(), ValidationError> {
        self.apply_timeout_override(std::env::var(TIMEOUT_ENV_VAR).ok().as_deref())
    }

    /// Apply a raw `EVALS_THREAD_TIMEOUT` value.
    ///
    /// Unparsable input is rejected and leaves the configured timeout untouched.
    pub fn apply_timeout_override(&mut self, raw: Option<&str>) -> Result<(), ValidationError> {
        let Some(raw) = raw else { return Ok(()) };
        let secs = raw.trim().parse::<f64>().map_err(|e| ValidationError {
            field: TIMEOUT_ENV_VAR,
            message: format!("invalid seconds '{}': {}", raw, e),
        })?;
        self.timeouts.call_secs = secs;
        Ok(())
    }
}

/// Remote API endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,

    /// Name of the environment variable holding the bearer token.
    pub api_key_env: String,

    /// Transport-level timeout applied by the HTTP client, in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Growth base of the exponential sequence.
    pub base: f64,

    /// Multiplier applied to every delay, in seconds.
    pub factor_secs: f64,

    /// Ceiling for a single delay, in seconds.
    pub max_delay_secs: f64,

    /// Maximum number of attempts. Unset means retry forever.
    pub max_attempts: Option<u32>,

    /// Randomize each delay within [0, delay].
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base: 2.0,
            factor_secs: 1.5,
            max_delay_secs: 60.0,
            max_attempts: None,
            jitter: false,
        }
    }
}

impl RetryConfig {
    /// Build the runtime retry policy.
    pub fn policy(&self) -> RetryPolicy {
        let defaults = BackoffPolicy::default();
        let backoff = BackoffPolicy {
            base: self.base,
            factor: secs_or(self.factor_secs, defaults.factor),
            max_delay: secs_or(self.max_delay_secs, defaults.max_delay),
            jitter: if self.jitter { Jitter::Full } else { Jitter::None },
        };
        RetryPolicy {
            backoff,
            max_attempts: self.max_attempts,
        }
    }
}

/// Bounded-time executor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Wall-clock deadline per attempt, in seconds.
    pub call_secs: f64,

    /// Maximum number of timed-out attempts. Unset means retry forever.
    pub max_attempts: Option<u32>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            call_secs: 40.0,
            max_attempts: None,
        }
    }
}

impl TimeoutConfig {
    /// Build the runtime executor.
    pub fn executor(&self) -> BoundedExecutor {
        BoundedExecutor {
            timeout: secs_or(self.call_secs, Duration::from_secs(40)),
            max_attempts: self.max_attempts,
        }
    }
}

// Unvalidated configs may carry negative or NaN seconds.
fn secs_or(secs: f64, fallback: Duration) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(fallback)
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus exporter bind address. Metrics are off when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
