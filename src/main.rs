//! Login relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                   LOGIN RELAY                    │
//!                     │                                                  │
//!   POST /login       │  ┌──────────┐   ┌───────────┐   ┌────────────┐   │
//!   ──────────────────┼─▶│ request  │──▶│   relay   │──▶│  reqwest   │───┼──▶ Authentication
//!                     │  │ validate │   │  client   │   │   Client   │   │    service
//!                     │  └────┬─────┘   └─────┬─────┘   └────────────┘   │
//!                     │       │               │                          │
//!                     │       ▼               ▼                          │
//!   JSON response     │  ┌──────────────────────────┐                    │
//!   ◀─────────────────┼──│   response::compose      │                    │
//!                     │  └──────────────────────────┘                    │
//!                     │                                                  │
//!                     │  correlation: Request ──────────────▶ Response   │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use login_relay::config::{load_config, LoadedConfig};
use login_relay::http::LoginServer;
use login_relay::lifecycle::Shutdown;
use login_relay::observability::init_logging;
use login_relay::relay::build_client;

#[derive(Parser)]
#[command(name = "login-relay")]
#[command(about = "Relays login requests to an authentication service", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    config: Option<PathBuf>,

    /// Listener address, overriding config and APP_BIND_ADDRESS.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let LoadedConfig { config, warnings } = load_config(args.config.as_deref(), args.bind)?;

    init_logging(&config.observability)?;
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!("login-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        log_level = %config.observability.log_level,
        upstream_timeout_secs = ?config.upstream.timeout_secs,
        "Configuration loaded"
    );

    let client = build_client(&config.upstream)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signals = shutdown.trigger_on_signal();

    LoginServer::new(config, client)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
