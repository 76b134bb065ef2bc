//! Route handlers organized by resource

pub mod health;
pub mod page;
pub mod students;
