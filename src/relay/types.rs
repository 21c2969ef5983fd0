//! Relay result and error types.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Body and status of a successful authentication call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResult {
    /// Status the authentication service answered with (always 200).
    pub status_code: u16,
    /// Parsed JSON body, handed back to the caller verbatim.
    pub body: Value,
}

/// Errors that can occur while relaying a login.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No authentication URL was configured.
    #[error("Environment variable '{0}' not set.")]
    NotConfigured(&'static str),

    /// The authentication service answered with something other than 200.
    #[error("authentication service responded with {status}")]
    Upstream { status: StatusCode },

    /// Connect, timeout or body decoding failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
