//! Authentication relay subsystem.
//!
//! # Data Flow
//! ```text
//! validated LoginRequest
//!     → client.rs (POST JSON to AUTHENTICATION_URL)
//!     → 200: UpstreamResult { status_code, body }
//!     → otherwise: RelayError (Upstream / Transport / NotConfigured)
//! ```
//!
//! # Design Decisions
//! - One reqwest::Client is built at startup and injected
//! - No retries; the login is forwarded exactly once
//! - No timeout unless `upstream.timeout_secs` is configured

pub mod client;
pub mod types;

pub use client::{build_client, configure_client, AuthRelay};
pub use types::{RelayError, RelayResult, UpstreamResult};
