//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the login and health handlers
//! - Wire up middleware (tracing, request ID)
//! - Serve on a listener until the shutdown signal fires

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::{health::get_health, login::login};
use crate::relay::AuthRelay;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<AuthRelay>,
}

/// HTTP server for the login relay.
pub struct LoginServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl LoginServer {
    /// Create a server around an already built upstream client.
    pub fn new(config: RelayConfig, client: reqwest::Client) -> Self {
        let config = Arc::new(config);
        let relay = Arc::new(AuthRelay::new(client, &config.upstream));

        if relay.url().is_none() {
            tracing::warn!("AUTHENTICATION_URL is not set; every login will fail with 500");
        }

        let state = AppState { relay };

        Self {
            router: Self::build_router(state),
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/login", post(login))
            .route("/health", get(get_health))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on the given listener until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = self.config.upstream.authentication_url.as_deref().unwrap_or("<unset>"),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
