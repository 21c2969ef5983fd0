//! Login request parsing and validation.
//!
//! # Responsibilities
//! - Parse the raw body into a typed `LoginRequest`
//! - Produce the echoed payload that is logged and forwarded
//! - Reject requests without a usable `userId`
//!
//! # Design Decisions
//! - The body is parsed here rather than by axum's `Json` extractor, so a
//!   malformed body still flows through correlation logging
//! - Only presence of `userId` is checked; its format is the upstream's business

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LoginError;

/// Incoming login payload. Unknown fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

impl LoginRequest {
    /// The payload as logged and forwarded: `{"userId": <value or null>}`.
    pub fn to_payload(&self) -> Value {
        serde_json::json!({ "userId": self.user_id })
    }

    /// Check that `userId` is present and non-empty.
    pub fn validate(&self) -> Result<&str, LoginError> {
        match self.user_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(LoginError::Validation {
                payload: self.to_payload(),
            }),
        }
    }
}

/// Parse a request body. Anything other than a JSON object is an internal
/// error, not a validation error.
pub fn parse_login(body: &[u8]) -> Result<LoginRequest, LoginError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| LoginError::Internal(e.to_string()))?;

    if !value.is_object() {
        return Err(LoginError::Internal(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| LoginError::Internal(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
