//! In-memory `IssueStore` used by the test wiring and single-process
//! deployments.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use domains::{Issue, IssueChanges, IssueFilter, IssueStore, StoreError};

/// DashMap-backed store. `find_many` results follow `created_on` with the
/// id as a tie-breaker, so repeated queries are stable.
#[derive(Default)]
pub struct MemoryIssueStore {
    issues: DashMap<Uuid, Issue>,
}

impl MemoryIssueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn insert(&self, issue: Issue) -> Result<(), StoreError> {
        self.issues.insert(issue.id, issue);
        Ok(())
    }

    async fn find_many(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let mut matches: Vec<Issue> = self
            .issues
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| a.created_on.cmp(&b.created_on).then(a.id.cmp(&b.id)));
        Ok(matches)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Issue>, StoreError> {
        Ok(self.issues.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: IssueChanges,
    ) -> Result<Option<Issue>, StoreError> {
        match self.issues.get_mut(&id) {
            Some(mut entry) => {
                changes.apply(entry.value_mut());
                Ok(Some(entry.value().clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.issues.remove(&id).is_some())
    }
}
