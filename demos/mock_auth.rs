//! Pretend authentication service for trying the relay locally.
//!
//! ```text
//! cargo run --example mock_auth
//! AUTHENTICATION_URL=http://127.0.0.1:8081/authenticate cargo run
//! cargo run --bin login-cli -- login alice
//! ```

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use uuid::Uuid;

const KNOWN_USERS: &[&str] = &["alice", "bob", "u1"];

async fn authenticate(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let user_id = body.get("userId").and_then(Value::as_str).unwrap_or_default();
    if KNOWN_USERS.contains(&user_id) {
        (
            StatusCode::OK,
            Json(json!({ "userId": user_id, "token": Uuid::new_v4().to_string() })),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({})))
    }
}

#[tokio::main]
async fn main() {
    let app = Router::new().route("/authenticate", post(authenticate));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Mock authentication service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
