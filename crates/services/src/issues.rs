//! # IssueService
//!
//! The resource controller behind `/api/issues/{project}`: parses the
//! loosely-typed request input, enforces the validation order, and
//! delegates document CRUD to the injected [`IssueStore`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, error};
use uuid::Uuid;

use domains::{Issue, IssueChanges, IssueFilter, IssueStore};

use crate::error::IssueError;
use crate::fields::{coerce_open, pick_present, QUERY_FIELDS, UPDATE_FIELDS};

/// Stateless coordinator for the issue operations.
///
/// Holds only the injected store; every request-scoped value stays on the
/// call stack, so concurrent requests share nothing but the store itself.
#[derive(Clone)]
pub struct IssueService {
    store: Arc<dyn IssueStore>,
}

impl IssueService {
    pub fn new(store: Arc<dyn IssueStore>) -> Self {
        Self { store }
    }

    /// Creates an issue from the request body.
    ///
    /// The three required fields are checked before the store is touched
    /// (an empty string still counts as supplied). Persistence failures
    /// are logged and do not alter the response: callers receive the
    /// document that was attempted, a compatibility trade-off carried
    /// over from the v1 API.
    pub async fn create(
        &self,
        project: &str,
        body: &Map<String, Value>,
    ) -> Result<Issue, IssueError> {
        let (Some(issue_title), Some(issue_text), Some(created_by)) = (
            body_str(body, "issue_title"),
            body_str(body, "issue_text"),
            body_str(body, "created_by"),
        ) else {
            return Err(IssueError::RequiredFieldsMissing);
        };

        let now = Utc::now();
        let issue = Issue {
            id: Uuid::new_v4(),
            project: project.to_string(),
            issue_title,
            issue_text,
            created_by,
            assigned_to: body_str(body, "assigned_to").unwrap_or_default(),
            status_text: body_str(body, "status_text").unwrap_or_default(),
            created_on: now,
            updated_on: now,
            open: true,
        };

        if let Err(err) = self.store.insert(issue.clone()).await {
            error!(%err, issue_id = %issue.id, "issue insert failed");
        }
        Ok(issue)
    }

    /// Runs a conjunctive equality query restricted to `project`.
    ///
    /// Unrecognized query keys are ignored. A malformed `_id`, timestamp,
    /// or `open` value poisons the whole filter and surfaces as the fixed
    /// lookup error, same as a store failure.
    pub async fn search(
        &self,
        project: &str,
        params: &Map<String, Value>,
    ) -> Result<Vec<Issue>, IssueError> {
        let mut picked = pick_present(params, &QUERY_FIELDS);
        coerce_open(&mut picked);

        let mut filter = IssueFilter::for_project(project);
        filter.issue_title = text_term(&picked, "issue_title");
        filter.issue_text = text_term(&picked, "issue_text");
        filter.created_by = text_term(&picked, "created_by");
        filter.assigned_to = text_term(&picked, "assigned_to");
        filter.status_text = text_term(&picked, "status_text");
        if let Some(value) = picked.get("open") {
            filter.open = Some(value.as_bool().ok_or(IssueError::Query)?);
        }
        if let Some(value) = picked.get("created_on") {
            filter.created_on = Some(parse_timestamp(value).ok_or(IssueError::Query)?);
        }
        if let Some(value) = picked.get("updated_on") {
            filter.updated_on = Some(parse_timestamp(value).ok_or(IssueError::Query)?);
        }
        if let Some(value) = picked.get("_id") {
            filter.id = Some(parse_id(value).ok_or(IssueError::Query)?);
        }

        debug!(?filter, "issue query");
        self.store.find_many(&filter).await.map_err(|err| {
            error!(%err, "issue query failed");
            IssueError::Query
        })
    }

    /// Applies a partial update to one issue.
    ///
    /// The check order is part of the contract and short-circuits:
    /// missing `_id` first, then the no-fields check, then the store.
    /// Returns the echoed `_id` on success.
    pub async fn update(&self, body: &Map<String, Value>) -> Result<String, IssueError> {
        let Some(raw_id) = id_param(body) else {
            return Err(IssueError::MissingId);
        };

        let mut picked = pick_present(body, &UPDATE_FIELDS);
        if picked.is_empty() {
            return Err(IssueError::NoUpdateFields { id: raw_id });
        }
        coerce_open(&mut picked);

        let Ok(id) = Uuid::parse_str(&raw_id) else {
            return Err(IssueError::CouldNotUpdate { id: raw_id });
        };

        let mut changes = IssueChanges::at(Utc::now());
        changes.issue_title = text_term(&picked, "issue_title");
        changes.issue_text = text_term(&picked, "issue_text");
        changes.created_by = text_term(&picked, "created_by");
        changes.assigned_to = text_term(&picked, "assigned_to");
        changes.status_text = text_term(&picked, "status_text");
        if let Some(value) = picked.get("open") {
            let Some(open) = value.as_bool() else {
                return Err(IssueError::CouldNotUpdate { id: raw_id });
            };
            changes.open = Some(open);
        }

        match self.store.update_by_id(id, changes).await {
            Ok(Some(_)) => Ok(raw_id),
            Ok(None) => Err(IssueError::CouldNotUpdate { id: raw_id }),
            Err(err) => {
                error!(%err, %id, "issue update failed");
                Err(IssueError::CouldNotUpdate { id: raw_id })
            }
        }
    }

    /// Removes one issue after an existence check. An unparseable id, a
    /// failed lookup, and not-found all produce the same answer. Returns
    /// the echoed `_id` on success.
    pub async fn delete(&self, body: &Map<String, Value>) -> Result<String, IssueError> {
        let Some(raw_id) = id_param(body) else {
            return Err(IssueError::MissingId);
        };
        let not_deleted = IssueError::CouldNotDelete { id: raw_id.clone() };

        let Ok(id) = Uuid::parse_str(&raw_id) else {
            return Err(not_deleted);
        };

        match self.store.find_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Err(not_deleted),
            Err(err) => {
                error!(%err, %id, "issue lookup failed");
                return Err(not_deleted);
            }
        }

        match self.store.delete_by_id(id).await {
            Ok(true) => Ok(raw_id),
            Ok(false) => Err(not_deleted),
            Err(err) => {
                error!(%err, %id, "issue delete failed");
                Err(not_deleted)
            }
        }
    }
}

/// The required-field check: the key must exist as a string, but an empty
/// string still counts.
fn body_str(body: &Map<String, Value>, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn id_param(body: &Map<String, Value>) -> Option<String> {
    body.get("_id").and_then(Value::as_str).map(str::to_owned)
}

fn text_term(picked: &Map<String, Value>, key: &str) -> Option<String> {
    picked.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn parse_id(value: &Value) -> Option<Uuid> {
    value.as_str().and_then(|raw| Uuid::parse_str(raw).ok())
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}
