//! Outbound call to the authentication service.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::schema::{UpstreamConfig, AUTHENTICATION_URL_ENV};
use crate::http::request::LoginRequest;
use crate::relay::types::{RelayError, RelayResult, UpstreamResult};

/// Build the process-wide HTTP client used for every relay call.
pub fn build_client(config: &UpstreamConfig) -> RelayResult<Client> {
    configure_client(Client::builder(), config)
}

/// Apply the upstream settings to a caller-supplied builder.
pub fn configure_client(
    mut builder: reqwest::ClientBuilder,
    config: &UpstreamConfig,
) -> RelayResult<Client> {
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Forwards validated logins to the configured authentication service.
#[derive(Debug, Clone)]
pub struct AuthRelay {
    client: Client,
    url: Option<String>,
}

impl AuthRelay {
    /// Create a relay around an already constructed client.
    pub fn new(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            url: config.authentication_url.clone(),
        }
    }

    /// The configured authentication URL, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// POST the login as JSON and map the answer.
    ///
    /// Only a 200 counts as success; its JSON body is returned as-is. Any
    /// other status becomes [`RelayError::Upstream`] without reading the body.
    pub async fn authenticate(&self, request: &LoginRequest) -> RelayResult<UpstreamResult> {
        let url = self
            .url
            .as_deref()
            .ok_or(RelayError::NotConfigured(AUTHENTICATION_URL_ENV))?;

        tracing::debug!(url = %url, "Relaying login to authentication service");

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            tracing::warn!(url = %url, status = %status, "Authentication service rejected login");
            return Err(RelayError::Upstream { status });
        }

        let body: Value = response.json().await?;
        Ok(UpstreamResult {
            status_code: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_with_timeout() {
        let config = UpstreamConfig {
            authentication_url: None,
            timeout_secs: Some(3),
        };
        assert!(build_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_unconfigured_relay_fails_without_calling_out() {
        let relay = AuthRelay::new(Client::new(), &UpstreamConfig::default());
        assert!(relay.url().is_none());

        let request = LoginRequest {
            user_id: Some("u1".into()),
        };
        let err = relay.authenticate(&request).await.unwrap_err();
        assert!(matches!(err, RelayError::NotConfigured("AUTHENTICATION_URL")));
    }

    #[tokio::test]
    async fn test_configured_timeout_bounds_silent_upstream() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let config = UpstreamConfig {
            authentication_url: Some(format!("http://{}/login", addr)),
            timeout_secs: Some(1),
        };
        let client = configure_client(Client::builder().no_proxy(), &config).unwrap();
        let relay = AuthRelay::new(client, &config);

        let request = LoginRequest {
            user_id: Some("u1".into()),
        };
        let started = std::time::Instant::now();
        match relay.authenticate(&request).await {
            Err(RelayError::Transport(e)) => assert!(e.is_timeout(), "{:?}", e),
            other => panic!("unexpected {:?}", other),
        }
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
