//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, backoff growth >= 1)
//! - Check the API base URL parses
//! - Check the log level is one `EnvFilter` understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GuardConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::schema::GuardConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GuardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = url::Url::parse(&config.api.base_url) {
        errors.push(ValidationError::new("api.base_url", format!("invalid URL: {}", e)));
    }
    if config.api.api_key_env.trim().is_empty() {
        errors.push(ValidationError::new("api.api_key_env", "must not be empty"));
    }
    if config.api.request_timeout_secs == Some(0) {
        errors.push(ValidationError::new("api.request_timeout_secs", "must be > 0"));
    }

    let retries = &config.retries;
    if !retries.base.is_finite() || retries.base < 1.0 {
        errors.push(ValidationError::new("retries.base", "must be >= 1"));
    }
    if !retries.factor_secs.is_finite() || retries.factor_secs <= 0.0 {
        errors.push(ValidationError::new("retries.factor_secs", "must be > 0"));
    }
    if !retries.max_delay_secs.is_finite() || retries.max_delay_secs < 0.0 {
        errors.push(ValidationError::new("retries.max_delay_secs", "must be >= 0"));
    }
    if retries.max_attempts == Some(0) {
        errors.push(ValidationError::new("retries.max_attempts", "must be >= 1 when set"));
    }

    let timeouts = &config.timeouts;
    if !timeouts.call_secs.is_finite() || timeouts.call_secs <= 0.0 {
        errors.push(ValidationError::new("timeouts.call_secs", "must be > 0"));
    }
    if timeouts.max_attempts == Some(0) {
        errors.push(ValidationError::new("timeouts.max_attempts", "must be >= 1 when set"));
    }

    let level = config.observability.log_level.as_str();
    if !LOG_LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level)) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}', expected one of {}", level, LOG_LEVELS.join("|")),
        ));
    }
    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("invalid socket address '{}'", addr),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
