//! Errors raised while handling a login.

use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::relay::RelayError;

/// Typed failure of one stage of the login pipeline.
#[derive(Debug, Error)]
pub enum LoginError {
    /// `userId` was absent, null or empty. Carries the echoed payload.
    #[error("userId is required")]
    Validation { payload: Value },

    /// The authentication service answered with a non-200 status.
    #[error("Error from authenticate service")]
    Upstream { status: StatusCode },

    /// Required configuration is missing. Reported to callers as internal.
    #[error("{0}")]
    Configuration(String),

    /// Anything else: malformed body, transport failure, bad upstream JSON.
    #[error("{0}")]
    Internal(String),
}

impl From<RelayError> for LoginError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Upstream { status } => LoginError::Upstream { status },
            RelayError::NotConfigured(_) => LoginError::Configuration(err.to_string()),
            RelayError::Transport(e) => LoginError::Internal(error_chain(&e)),
        }
    }
}

/// Render an error followed by each of its sources, joined with `": "`.
/// A source whose message repeats the previous one is skipped.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut last = message.clone();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !last.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        last = text;
        source = cause.source();
    }
    message
}
