//! Environment overrides applied by the config loader.
//!
//! Kept in its own test binary: it mutates the process environment.

use std::time::Duration;

use resilient_completion::config::schema::TIMEOUT_ENV_VAR;
use resilient_completion::config::{load_config, load_default, ConfigError};

#[test]
fn test_timeout_env_var_is_applied_or_rejected() {
    std::env::set_var(TIMEOUT_ENV_VAR, "soon");
    let err = load_default().unwrap_err();
    match &err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, TIMEOUT_ENV_VAR);
        }
        other => panic!("expected validation error, got {}", other),
    }
    assert!(err.to_string().contains("EVALS_THREAD_TIMEOUT: invalid seconds 'soon'"));

    // Rejections are reported alongside file errors.
    let path = std::env::temp_dir().join(format!("guard-env-{}.toml", std::process::id()));
    std::fs::write(&path, "[retries]\nmax_attempts = 0\n").unwrap();
    let msg = load_config(&path).unwrap_err().to_string();
    assert!(msg.contains(TIMEOUT_ENV_VAR));
    assert!(msg.contains("retries.max_attempts"));
    let _ = std::fs::remove_file(path);

    std::env::set_var(TIMEOUT_ENV_VAR, " 12.5 ");
    let config = load_default().unwrap();
    assert_eq!(config.timeouts.executor().timeout, Duration::from_millis(12_500));

    std::env::set_var(TIMEOUT_ENV_VAR, "0");
    let errors = match load_default().unwrap_err() {
        ConfigError::Validation(errors) => errors,
        other => panic!("expected validation error, got {}", other),
    };
    assert_eq!(errors[0].field, "timeouts.call_secs");

    std::env::remove_var(TIMEOUT_ENV_VAR);
    let config = load_default().unwrap();
    assert_eq!(config.timeouts.call_secs, 40.0);
}
