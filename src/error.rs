//! Error taxonomy shared by every layer.
//!
//! # Design Decisions
//! - `ErrorKind` is the fixed boundary enumeration the retry policy keys on
//! - Whatever the HTTP client throws is mapped into `CompletionError` by
//!   `http::classify`, so retry behavior never depends on a client version
//! - Anything without a kind is fatal and propagates on first occurrence

use std::error::Error;
use std::fmt;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Transient failure classifications eligible for automatic retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ServiceUnavailable,
    Api,
    RateLimited,
    Connection,
    Timeout,
}

impl ErrorKind {
    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::Api => "api",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Connection => "connection",
            ErrorKind::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while obtaining a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Upstream reported it cannot serve requests right now.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Generic API failure, including responses that embed an error payload.
    #[error("API error: {message}")]
    Api {
        message: String,
        payload: Option<Value>,
    },

    /// Upstream rejected the call for exceeding its rate limit.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The connection could not be established or was dropped.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The remote call itself reported a timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Upstream refused the request as malformed or unauthorized.
    #[error("Invalid request (HTTP {status}): {message}")]
    InvalidRequest { status: u16, message: String },

    /// A successful response could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The bounded executor hit its attempt cap without a completed call.
    #[error("No attempt completed within {timeout:?} after {attempts} attempts")]
    DeadlineExceeded { attempts: u32, timeout: Duration },

    /// The retry policy hit its attempt cap.
    #[error("Giving up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<CompletionError>,
    },

    /// The worker running an attempt panicked.
    #[error("Worker panicked: {0}")]
    WorkerPanicked(String),

    /// Any other failure raised by the remote call.
    #[error("{0}")]
    Fatal(Box<dyn Error + Send + Sync>),
}

impl CompletionError {
    /// Build an `Api` error from a raw embedded error structure.
    pub fn from_payload(payload: Value) -> Self {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| payload.to_string());
        CompletionError::Api {
            message,
            payload: Some(payload),
        }
    }

    /// Wrap an arbitrary error as fatal.
    pub fn fatal<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        CompletionError::Fatal(err.into())
    }

    /// Transient classification, `None` for fatal errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            CompletionError::ServiceUnavailable(_) => Some(ErrorKind::ServiceUnavailable),
            CompletionError::Api { .. } => Some(ErrorKind::Api),
            CompletionError::RateLimited(_) => Some(ErrorKind::RateLimited),
            CompletionError::Connection(_) => Some(ErrorKind::Connection),
            CompletionError::Timeout(_) => Some(ErrorKind::Timeout),
            _ => None,
        }
    }

    /// True if the retry policy may try again.
    pub fn is_retryable(&self) -> bool {
        self.kind().is_some()
    }
}

/// Result type for completion operations.
pub type CompletionResult<T> = Result<T, CompletionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transient_kinds_are_retryable() {
        let errors = [
            CompletionError::ServiceUnavailable("down".into()),
            CompletionError::from_payload(json!({"message": "boom"})),
            CompletionError::RateLimited("slow down".into()),
            CompletionError::Connection("reset".into()),
            CompletionError::Timeout("read".into()),
        ];
        for err in errors {
            assert!(err.is_retryable(), "{err} should be retryable");
        }
    }

    #[test]
    fn test_fatal_errors_have_no_kind() {
        assert_eq!(CompletionError::fatal("bad prompt").kind(), None);
        assert_eq!(
            CompletionError::InvalidRequest { status: 401, message: "no key".into() }.kind(),
            None
        );
        let capped = CompletionError::DeadlineExceeded {
            attempts: 3,
            timeout: Duration::from_secs(1),
        };
        assert!(!capped.is_retryable());
    }

    #[test]
    fn test_payload_message_extraction() {
        let err = CompletionError::from_payload(json!({"message": "rate limited", "code": 429}));
        assert_eq!(err.to_string(), "API error: rate limited");

        let err = CompletionError::from_payload(json!("plain string"));
        match err {
            CompletionError::Api { message, payload } => {
                assert_eq!(message, "\"plain string\"");
                assert_eq!(payload, Some(json!("plain string")));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
