//! gymdesk-core: student records, input validation and configuration
//!
//! Shared by the HTTP server and the CLI. Nothing in here touches the
//! database; persistence lives in `gymdesk-server`.

pub mod config;
pub mod error;
pub mod student;
pub mod validation;

pub use config::GymdeskConfig;
pub use error::ConfigError;
pub use student::{default_birth_date, parse_stored_date, Student, StudentDraft, StudentId};
pub use validation::ValidationError;
