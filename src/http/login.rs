//! `POST /login`.

use axum::{body::Bytes, extract::State};

use crate::error::LoginError;
use crate::http::request::{parse_login, LoginRequest};
use crate::http::response::{compose, LoginResponse};
use crate::http::server::AppState;
use crate::observability::correlation;
use crate::relay::{AuthRelay, UpstreamResult};

/// Component name attached to every correlation event of this endpoint.
pub const COMPONENT: &str = "login";

/// Validate, relay and compose, bracketed by one Request and one Response
/// correlation event.
pub async fn login(State(state): State<AppState>, body: Bytes) -> LoginResponse {
    let parsed = parse_login(&body);
    let payload = parsed.as_ref().ok().map(LoginRequest::to_payload);

    let transaction = correlation::begin(COMPONENT, payload.as_ref());

    let outcome = match parsed {
        Ok(request) => relay_login(&state.relay, &request).await,
        Err(err) => Err(err),
    };

    let response = compose(outcome);
    transaction.end(response.status.as_u16(), Some(&response.body));
    response
}

async fn relay_login(
    relay: &AuthRelay,
    request: &LoginRequest,
) -> Result<UpstreamResult, LoginError> {
    request.validate()?;
    Ok(relay.authenticate(request).await?)
}
