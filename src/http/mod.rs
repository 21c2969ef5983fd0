//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! POST /login
//!     → server.rs (Axum setup, request ID, trace layer)
//!     → login.rs (opens the correlation transaction)
//!     → request.rs (parse body, validate userId)
//!     → [relay forwards to the authentication service]
//!     → response.rs (status + JSON body)
//!     → login.rs (closes the correlation transaction)
//! ```

pub mod health;
pub mod login;
pub mod request;
pub mod response;
pub mod server;

pub use request::LoginRequest;
pub use response::{compose, LoginResponse};
pub use server::{AppState, LoginServer};
