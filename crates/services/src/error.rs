//! Request-level failures for the issue operations.
//!
//! Validation variants are detected before any store access. The rest
//! deliberately collapse "not found", "unparseable id", and backend
//! trouble into one fixed answer per operation; clients are never shown
//! internal error detail.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IssueError {
    #[error("required field(s) missing")]
    RequiredFieldsMissing,

    #[error("missing _id")]
    MissingId,

    #[error("no update field(s) sent")]
    NoUpdateFields { id: String },

    #[error("could not update")]
    CouldNotUpdate { id: String },

    #[error("could not delete")]
    CouldNotDelete { id: String },

    #[error("Error getting issues")]
    Query,
}
