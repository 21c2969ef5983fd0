//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! login handler
//!     → correlation.rs (Request / Response events sharing a transactionId)
//!     → logging.rs (subscriber: filter from APP_LOG_LEVEL, JSON or pretty)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Correlation events are plain `tracing` events, so any subscriber sees them
//! - No metrics or exporters

pub mod correlation;
pub mod logging;

pub use correlation::{CorrelationRecord, Transaction};
pub use logging::init_logging;
