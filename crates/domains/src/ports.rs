//! # Ports
//!
//! Persistence contract implemented by the storage adapters. Not-found is
//! modeled in the return types; `StoreError` is reserved for backend
//! trouble.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Issue, IssueChanges, IssueFilter};

/// Document CRUD over the issue collection.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Persists a fully-built issue under its pre-minted id.
    async fn insert(&self, issue: Issue) -> Result<(), StoreError>;

    /// Returns all issues matching every term of the filter, oldest first.
    async fn find_many(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Issue>, StoreError>;

    /// Merges the present fields into the stored document. Returns the
    /// updated issue, or `None` when no document has that id.
    async fn update_by_id(
        &self,
        id: Uuid,
        changes: IssueChanges,
    ) -> Result<Option<Issue>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}
