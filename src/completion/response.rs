//! Embedded-error detection on successful responses.

use serde_json::Value;

use crate::error::{CompletionError, CompletionResult};
use crate::observability::metrics;

/// The `"error"` member of a response object, if present.
///
/// Presence of the key is what counts, even when its value is `null`.
pub fn embedded_error(response: &Value) -> Option<&Value> {
    response.as_object()?.get("error")
}

/// Pass a clean response through, turn an embedded error into `Api`.
pub fn reclassify(operation: &'static str, response: Value) -> CompletionResult<Value> {
    let Some(payload) = embedded_error(&response) else {
        return Ok(response);
    };

    metrics::record_embedded_error(operation);
    tracing::warn!(operation, payload = %payload, "Response carried an embedded error");
    Err(CompletionError::from_payload(payload.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_response_passes_through() {
        let response = json!({"choices": [{"text": "hi"}]});
        assert_eq!(reclassify("test", response.clone()).unwrap(), response);
    }

    #[test]
    fn test_embedded_error_becomes_api_error() {
        let response = json!({"error": {"message": "rate limited"}});
        match reclassify("test", response).unwrap_err() {
            CompletionError::Api { message, payload } => {
                assert_eq!(message, "rate limited");
                assert_eq!(payload, Some(json!({"message": "rate limited"})));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_key_presence_counts() {
        assert!(embedded_error(&json!({"error": null})).is_some());
        assert!(embedded_error(&json!({"errors": []})).is_none());
        assert!(embedded_error(&json!(["error"])).is_none());
        assert!(embedded_error(&json!("error")).is_none());
    }
}
