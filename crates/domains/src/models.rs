//! # Domain Models
//!
//! Core entities of the issue tracker. Issues carry a v4 UUID minted when
//! the document is first built, so the API can echo an identifier even
//! when persistence settles later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked unit of work, scoped to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: Uuid,
    /// String-keyed partition; taken from the URL path, never from a
    /// request body.
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    /// Set once at creation.
    pub created_on: DateTime<Utc>,
    /// Reset on every successful update; always >= `created_on`.
    pub updated_on: DateTime<Utc>,
    pub open: bool,
}

/// Conjunctive equality filter over issues.
///
/// `project` is always present; every other term narrows the match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueFilter {
    pub project: String,
    pub id: Option<Uuid>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl IssueFilter {
    pub fn for_project(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Self::default()
        }
    }

    /// Every present term must hold; absent terms do not constrain.
    pub fn matches(&self, issue: &Issue) -> bool {
        fn term<T: PartialEq>(want: &Option<T>, got: &T) -> bool {
            want.as_ref().is_none_or(|want| want == got)
        }

        issue.project == self.project
            && term(&self.id, &issue.id)
            && term(&self.issue_title, &issue.issue_title)
            && term(&self.issue_text, &issue.issue_text)
            && term(&self.created_by, &issue.created_by)
            && term(&self.assigned_to, &issue.assigned_to)
            && term(&self.status_text, &issue.status_text)
            && term(&self.open, &issue.open)
            && term(&self.created_on, &issue.created_on)
            && term(&self.updated_on, &issue.updated_on)
    }
}

/// Partial update over one issue's mutable fields.
///
/// `None` fields are left untouched in the stored document; `updated_on`
/// is stamped unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueChanges {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
    pub updated_on: DateTime<Utc>,
}

impl IssueChanges {
    pub fn at(updated_on: DateTime<Utc>) -> Self {
        Self {
            issue_title: None,
            issue_text: None,
            created_by: None,
            assigned_to: None,
            status_text: None,
            open: None,
            updated_on,
        }
    }

    /// Merges the present fields into `issue` and stamps `updated_on`.
    /// `id`, `project`, and `created_on` are never touched.
    pub fn apply(&self, issue: &mut Issue) {
        if let Some(value) = &self.issue_title {
            issue.issue_title = value.clone();
        }
        if let Some(value) = &self.issue_text {
            issue.issue_text = value.clone();
        }
        if let Some(value) = &self.created_by {
            issue.created_by = value.clone();
        }
        if let Some(value) = &self.assigned_to {
            issue.assigned_to = value.clone();
        }
        if let Some(value) = &self.status_text {
            issue.status_text = value.clone();
        }
        if let Some(value) = self.open {
            issue.open = value;
        }
        issue.updated_on = self.updated_on;
    }
}
