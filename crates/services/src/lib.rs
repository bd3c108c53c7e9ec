//! issue-tracker/crates/services/src/lib.rs
//!
//! Application services: the issue resource controller and its
//! field-projection rules.

pub mod error;
pub mod fields;
pub mod issues;

pub use error::IssueError;
pub use issues::IssueService;
