//! Response shaping for the issue API.
//!
//! Every response is HTTP 200; success and failure are told apart by the
//! payload alone. The `project` field never appears in a response body.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use domains::Issue;
use services::IssueError;

/// Client-facing projection of an [`Issue`]. The project partition stays
/// server-side; the id renders as `_id`.
#[derive(Debug, Serialize)]
pub struct IssueView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub open: bool,
}

impl From<Issue> for IssueView {
    fn from(issue: Issue) -> Self {
        Self {
            id: issue.id,
            issue_title: issue.issue_title,
            issue_text: issue.issue_text,
            created_by: issue.created_by,
            assigned_to: issue.assigned_to,
            status_text: issue.status_text,
            created_on: issue.created_on,
            updated_on: issue.updated_on,
            open: issue.open,
        }
    }
}

/// Maps a service error to its fixed wire payload.
pub fn error_body(err: &IssueError) -> Value {
    match err {
        IssueError::RequiredFieldsMissing => json!({ "error": "required field(s) missing" }),
        IssueError::MissingId => json!({ "error": "missing _id" }),
        IssueError::NoUpdateFields { id } => {
            json!({ "error": "no update field(s) sent", "_id": id })
        }
        IssueError::CouldNotUpdate { id } => json!({ "error": "could not update", "_id": id }),
        IssueError::CouldNotDelete { id } => json!({ "error": "could not delete", "_id": id }),
        IssueError::Query => json!({ "error": "Error getting issues" }),
    }
}
