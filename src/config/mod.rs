//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (AUTHENTICATION_URL, APP_LOG_LEVEL, ...)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc with the handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults, so running with no file at all is valid
//! - A missing AUTHENTICATION_URL is not a startup error; each login fails instead

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, LoadedConfig};
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, RelayConfig, UpstreamConfig};
pub use validation::ValidationError;
