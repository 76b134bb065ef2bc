//! gymdesk-server: student registration form over SQLite
//!
//! Serves the front-desk page (create, list, update, delete) and a small
//! JSON API for the same records.

pub mod db;
pub mod http;
pub mod views;

pub use db::{ensure_schema, Database, DbError, StudentRepo};
pub use http::{build_router, run_server, AppState, ServerConfig};
