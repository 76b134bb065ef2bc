//! HTTP server layer
//!
//! Axum server with:
//! - The front-desk HTML page and its form posts
//! - A JSON API over the same records
//! - Request tracing
//! - Graceful shutdown

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
