//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and ledger calls produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) is attached to every trace span
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
