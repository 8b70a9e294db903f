//! HTTP/JSON surface of the storefront.
//!
//! # Responsibility
//! - Map routes onto `storefront_core` services.
//! - Own the HTTP status-code contract and request logging.
//!
//! # Invariants
//! - Handlers never touch a global session; the store arrives via `State`.
//! - Handlers never panic on bad input; every failure is an `ApiError`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod request_log;
pub mod server;
pub mod state;

pub use config::{ServerConfig, DEFAULT_BIND_ADDR, DEFAULT_DB_FILE_NAME};
pub use error::ApiError;
pub use handlers::MessageBody;
pub use server::{router, serve, ServeError};
pub use state::AppState;
