//! Mapping of HTTP client failures onto the `CompletionError` taxonomy.
//!
//! # Rules
//! - 429 → RateLimited
//! - 503 → ServiceUnavailable
//! - 408, 504 → Timeout
//! - other 5xx → Api
//! - everything else → InvalidRequest (fatal)
//! - transport: timeout → Timeout, connect → Connection, decode → Decode,
//!   builder → Fatal, anything else mid-flight → Connection

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::CompletionError;

/// Classify a non-success HTTP response.
pub fn from_status(status: StatusCode, body: &str) -> CompletionError {
    let payload = error_payload(body);
    let message = payload
        .as_ref()
        .and_then(|p| p.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| status.to_string());

    match status.as_u16() {
        429 => CompletionError::RateLimited(message),
        503 => CompletionError::ServiceUnavailable(message),
        408 | 504 => CompletionError::Timeout(message),
        500..=599 => CompletionError::Api { message, payload },
        code => CompletionError::InvalidRequest {
            status: code,
            message,
        },
    }
}

/// Classify a failure raised by the HTTP client itself.
pub fn from_transport(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout(err.to_string())
    } else if err.is_connect() {
        CompletionError::Connection(err.to_string())
    } else if err.is_decode() {
        CompletionError::Decode(err.to_string())
    } else if err.is_builder() {
        CompletionError::fatal(err)
    } else {
        CompletionError::Connection(err.to_string())
    }
}

fn error_payload(body: &str) -> Option<Value> {
    serde_json::from_str::<Value>(body).ok()?.get("error").cloned()
}
