//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing_subscriber::fmt::MakeWriter;

use login_relay::config::RelayConfig;
use login_relay::http::LoginServer;
use login_relay::lifecycle::Shutdown;

/// A programmable fake authentication service.
pub struct MockAuth {
    pub url: String,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockAuth {
    /// Number of requests the service has received.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Bodies the service has received, in order.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

struct MockState<F> {
    respond: Arc<F>,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Value>>>,
}

impl<F> Clone for MockState<F> {
    fn clone(&self) -> Self {
        Self {
            respond: self.respond.clone(),
            hits: self.hits.clone(),
            received: self.received.clone(),
        }
    }
}

/// Start a mock authentication service on an ephemeral port. `respond`
/// decides the status and JSON body for each received payload.
pub async fn start_mock_auth<F, Fut>(respond: F) -> MockAuth
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, Value)> + Send + 'static,
{
    async fn handle<F, Fut>(
        State(state): State<MockState<F>>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = (u16, Value)> + Send + 'static,
    {
        state.hits.fetch_add(1, Ordering::SeqCst);
        state.received.lock().unwrap().push(body.clone());
        let (status, body) = (state.respond)(body).await;
        (StatusCode::from_u16(status).unwrap(), Json(body))
    }

    let hits = Arc::new(AtomicUsize::new(0));
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        respond: Arc::new(respond),
        hits: hits.clone(),
        received: received.clone(),
    };

    let app = Router::new()
        .route("/authenticate", post(handle::<F, Fut>))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockAuth {
        url: format!("http://{}/authenticate", addr),
        hits,
        received,
    }
}

/// Mock service that always answers with the same status and body.
pub async fn start_fixed_auth(status: u16, body: Value) -> MockAuth {
    start_mock_auth(move |_| {
        let body = body.clone();
        async move { (status, body) }
    })
    .await
}

/// Start a bare TCP backend that answers every connection with a fixed
/// `200 OK` and a plain-text body.
pub async fn start_raw_auth(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response_str = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response.len(),
                    response
                );
                let _ = socket.write_all(response_str.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}/authenticate", addr)
}

/// A URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/authenticate", addr)
}

pub fn relay_config(authentication_url: Option<String>) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.authentication_url = authentication_url;
    config
}

pub fn upstream_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Start the relay on an ephemeral port.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    start_relay_with_client(config, upstream_client()).await
}

pub async fn start_relay_with_client(
    config: RelayConfig,
    client: reqwest::Client,
) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = LoginServer::new(config, client);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// In-memory sink for JSON log lines.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install a JSON subscriber writing into this capture for the current
    /// thread. Logs stop being captured when the guard drops.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_max_level(tracing::Level::INFO)
            .with_writer(capture.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    /// Every captured line, parsed.
    pub fn lines(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    /// Correlation events only.
    pub fn correlation_events(&self) -> Vec<Value> {
        self.lines()
            .into_iter()
            .filter(|e| e["target"] == "login_relay::correlation")
            .filter(|e| e["message"] == "Request" || e["message"] == "Response")
            .collect()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
