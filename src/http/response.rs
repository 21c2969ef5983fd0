//! Mapping login outcomes to HTTP responses.
//!
//! | Outcome                 | Status          | Body                                   |
//! |-------------------------|-----------------|----------------------------------------|
//! | relay succeeded         | 200             | upstream body verbatim                 |
//! | `userId` missing        | 400             | echoed `{"userId": ...}`               |
//! | upstream non-200        | upstream status | `{"error", "returnCode"}`              |
//! | config / internal error | 500             | `{"error": "INTERNAL SERVER ERROR", "details"}` |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::error::LoginError;
use crate::relay::UpstreamResult;

/// `error` value for any 500 response.
pub const INTERNAL_ERROR: &str = "INTERNAL SERVER ERROR";

/// `error` value when the authentication service refuses the login.
pub const UPSTREAM_ERROR: &str = "Error from authenticate service";

/// A composed status and JSON body, ready to be logged and sent.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl LoginResponse {
    fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

/// Turn the pipeline outcome into the response the caller sees.
pub fn compose(outcome: Result<UpstreamResult, LoginError>) -> LoginResponse {
    match outcome {
        Ok(result) => LoginResponse::new(StatusCode::OK, result.body),
        Err(err) => compose_error(err),
    }
}

fn compose_error(err: LoginError) -> LoginResponse {
    match err {
        LoginError::Validation { payload } => LoginResponse::new(StatusCode::BAD_REQUEST, payload),
        LoginError::Upstream { status } => LoginResponse::new(
            status,
            json!({ "error": UPSTREAM_ERROR, "returnCode": status.as_u16() }),
        ),
        LoginError::Configuration(details) | LoginError::Internal(details) => {
            tracing::error!(details = %details, "Login failed with internal error");
            LoginResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": INTERNAL_ERROR, "details": details }),
            )
        }
    }
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
