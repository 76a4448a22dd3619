//! Command-line front end for the resilient completion client.
//!
//! ```text
//!  CLI args + config file + EVALS_THREAD_TIMEOUT
//!        │
//!        ▼
//!  GuardConfig ──▶ CompletionClient ──▶ retry/backoff ──▶ [bounded executor] ──▶ HTTP API
//!                                                                                  │
//!  stdout (pretty JSON) ◀──────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use resilient_completion::config::validation::validate_config;
use resilient_completion::config::{load_config, load_default, ConfigError};
use resilient_completion::observability::{logging, metrics};
use resilient_completion::{CompletionClient, CompletionRequest, HttpCompletionApi};

#[derive(Parser)]
#[command(name = "resilient-completion")]
#[command(about = "Send completion requests with automatic retry and per-attempt deadlines", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-attempt deadline for `chat`, in seconds.
    #[arg(short, long)]
    timeout: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a text completion
    Complete {
        #[arg(short, long)]
        model: String,
        #[arg(short, long)]
        prompt: String,
        #[arg(long)]
        max_tokens: Option<u32>,
    },
    /// Create a chat completion under the per-attempt deadline
    Chat {
        #[arg(short, long)]
        model: String,
        #[arg(short = 'M', long)]
        message: String,
        #[arg(long)]
        system: Option<String>,
    },
    /// Print the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default()?,
    };
    if let Some(secs) = cli.timeout {
        config.timeouts.call_secs = secs;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability.log_level);

    if let Some(addr) = &config.observability.metrics_address {
        if let Ok(addr) = addr.parse() {
            metrics::init_metrics(addr);
        }
    }

    tracing::debug!(
        base_url = %config.api.base_url,
        timeout_secs = config.timeouts.call_secs,
        max_retry_attempts = ?config.retries.max_attempts,
        "Configuration loaded"
    );

    let response = match cli.command {
        Commands::ShowConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
            return Ok(());
        }
        Commands::Complete {
            model,
            prompt,
            max_tokens,
        } => {
            let client = build_client(&config)?;
            let mut request = object(json!({ "model": model, "prompt": prompt }));
            if let Some(max_tokens) = max_tokens {
                request.insert("max_tokens".into(), json!(max_tokens));
            }
            client.completion(request).await?
        }
        Commands::Chat {
            model,
            message,
            system,
        } => {
            let client = build_client(&config)?;
            let mut messages = Vec::new();
            if let Some(system) = system {
                messages.push(json!({ "role": "system", "content": system }));
            }
            messages.push(json!({ "role": "user", "content": message }));
            let request = object(json!({ "model": model, "messages": messages }));
            client.chat_completion(request).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn build_client(
    config: &resilient_completion::GuardConfig,
) -> Result<CompletionClient<HttpCompletionApi>, Box<dyn std::error::Error>> {
    let api = HttpCompletionApi::from_config(&config.api)?;
    Ok(CompletionClient::from_config(api, config))
}

fn object(value: Value) -> CompletionRequest {
    match value {
        Value::Object(map) => map,
        _ => CompletionRequest::new(),
    }
}
