//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! resilience + completion layers produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → Prometheus scrape (optional)
//! ```

pub mod logging;
pub mod metrics;
