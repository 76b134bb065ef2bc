//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Opens one connection per call, never shared between calls
//! - Reports missing rows through `DbError::NotFound` from the write itself
//! - Maps rows by hand into `gymdesk-core` types

pub mod students;

pub use students::StudentRepo;

use gymdesk_core::StudentId;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn student_not_found(id: StudentId) -> Self {
        Self::NotFound {
            resource: "student",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
