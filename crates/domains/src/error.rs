//! Failures surfaced by an `IssueStore` implementation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend rejected or failed the operation (connection loss,
    /// constraint violation, row decode failure, ...).
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
