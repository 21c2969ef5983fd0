//! Login relay library.
//!
//! Accepts `POST /login`, forwards `{"userId": ...}` to an authentication
//! service and maps its answer back, logging a correlated Request/Response
//! pair for every call.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::schema::RelayConfig;
pub use error::LoginError;
pub use http::LoginServer;
pub use lifecycle::Shutdown;
