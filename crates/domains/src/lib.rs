//! issue-tracker/crates/domains/src/lib.rs
//!
//! The central domain types and port definitions for the issue tracker.

pub mod error;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn sample_issue() -> Issue {
        let now = Utc::now();
        Issue {
            id: Uuid::new_v4(),
            project: "apitest".to_string(),
            issue_title: "title".to_string(),
            issue_text: "text".to_string(),
            created_by: "alice".to_string(),
            assigned_to: String::new(),
            status_text: String::new(),
            created_on: now,
            updated_on: now,
            open: true,
        }
    }

    #[test]
    fn filter_is_conjunctive() {
        let issue = sample_issue();

        let mut filter = IssueFilter::for_project("apitest");
        assert!(filter.matches(&issue));

        filter.created_by = Some("alice".to_string());
        assert!(filter.matches(&issue));

        filter.issue_text = Some("other".to_string());
        assert!(!filter.matches(&issue));
    }

    #[test]
    fn filter_requires_project_match() {
        let issue = sample_issue();
        assert!(!IssueFilter::for_project("elsewhere").matches(&issue));
    }

    #[test]
    fn changes_apply_leaves_identity_alone() {
        let mut issue = sample_issue();
        let id = issue.id;
        let created_on = issue.created_on;

        let mut changes = IssueChanges::at(created_on + Duration::seconds(5));
        changes.open = Some(false);
        changes.assigned_to = Some("bob".to_string());
        changes.apply(&mut issue);

        assert_eq!(issue.id, id);
        assert_eq!(issue.project, "apitest");
        assert_eq!(issue.created_on, created_on);
        assert!(!issue.open);
        assert_eq!(issue.assigned_to, "bob");
        assert!(issue.updated_on > issue.created_on);
        // untouched fields survive the merge
        assert_eq!(issue.issue_title, "title");
    }
}
