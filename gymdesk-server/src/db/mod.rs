//! Database layer - connections, schema and the student repository
//!
//! # Design Principles
//!
//! - One connection per operation, released when the operation ends
//!   (explicit close on success, drop on error)
//! - No transaction spans more than one statement
//! - Missing rows are detected from the write itself, not check-then-write

pub mod connect;
pub mod repos;
pub mod schema;

pub use connect::Database;
pub use repos::{DbError, StudentRepo};
pub use schema::ensure_schema;
