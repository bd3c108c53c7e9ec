//! # SQLite `IssueStore`
//!
//! Maps the issue documents onto a single `issues` table. Ids are stored
//! as TEXT, timestamps through sqlx's chrono support, and the optional
//! filter/update terms become dynamic WHERE/SET clauses.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use uuid::Uuid;

use domains::{Issue, IssueChanges, IssueFilter, IssueStore, StoreError};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS issues (
    id          TEXT PRIMARY KEY,
    project     TEXT NOT NULL,
    issue_title TEXT NOT NULL,
    issue_text  TEXT NOT NULL,
    created_by  TEXT NOT NULL,
    assigned_to TEXT NOT NULL DEFAULT '',
    status_text TEXT NOT NULL DEFAULT '',
    created_on  TEXT NOT NULL,
    updated_on  TEXT NOT NULL,
    open        INTEGER NOT NULL DEFAULT 1
)";

const PROJECT_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_issues_project ON issues (project)";

const SELECT_COLUMNS: &str = "SELECT id, project, issue_title, issue_text, created_by, \
     assigned_to, status_text, created_on, updated_on, open FROM issues";

pub struct SqliteIssueStore {
    pool: SqlitePool,
}

impl SqliteIssueStore {
    /// Opens a pool against `url` (e.g. `sqlite:issues.db?mode=rwc`) and
    /// ensures the schema exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        tracing::debug!(url, "opening sqlite issue store");
        let pool = SqlitePool::connect(url).await.map_err(StoreError::backend)?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(StoreError::backend)?;
        sqlx::query(PROJECT_INDEX)
            .execute(&pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(Self { pool })
    }
}

fn row_to_issue(row: &SqliteRow) -> Result<Issue, StoreError> {
    let raw_id: String = row.try_get("id").map_err(StoreError::backend)?;
    Ok(Issue {
        id: Uuid::parse_str(&raw_id).map_err(StoreError::backend)?,
        project: row.try_get("project").map_err(StoreError::backend)?,
        issue_title: row.try_get("issue_title").map_err(StoreError::backend)?,
        issue_text: row.try_get("issue_text").map_err(StoreError::backend)?,
        created_by: row.try_get("created_by").map_err(StoreError::backend)?,
        assigned_to: row.try_get("assigned_to").map_err(StoreError::backend)?,
        status_text: row.try_get("status_text").map_err(StoreError::backend)?,
        created_on: row.try_get("created_on").map_err(StoreError::backend)?,
        updated_on: row.try_get("updated_on").map_err(StoreError::backend)?,
        open: row.try_get("open").map_err(StoreError::backend)?,
    })
}

#[async_trait]
impl IssueStore for SqliteIssueStore {
    async fn insert(&self, issue: Issue) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO issues (id, project, issue_title, issue_text, created_by, \
             assigned_to, status_text, created_on, updated_on, open) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(issue.id.to_string())
        .bind(issue.project)
        .bind(issue.issue_title)
        .bind(issue.issue_text)
        .bind(issue.created_by)
        .bind(issue.assigned_to)
        .bind(issue.status_text)
        .bind(issue.created_on)
        .bind(issue.updated_on)
        .bind(issue.open)
        .execute(&self.pool)
        .await
        .map_err(StoreError::backend)?;
        Ok(())
    }

    async fn find_many(&self, filter: &IssueFilter) -> Result<Vec<Issue>, StoreError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_COLUMNS);
        query.push(" WHERE project = ");
        query.push_bind(filter.project.clone());
        if let Some(id) = filter.id {
            query.push(" AND id = ").push_bind(id.to_string());
        }
        if let Some(value) = &filter.issue_title {
            query.push(" AND issue_title = ").push_bind(value.clone());
        }
        if let Some(value) = &filter.issue_text {
            query.push(" AND issue_text = ").push_bind(value.clone());
        }
        if let Some(value) = &filter.created_by {
            query.push(" AND created_by = ").push_bind(value.clone());
        }
        if let Some(value) = &filter.assigned_to {
            query.push(" AND assigned_to = ").push_bind(value.clone());
        }
        if let Some(value) = &filter.status_text {
            query.push(" AND status_text = ").push_bind(value.clone());
        }
        if let Some(value) = filter.open {
            query.push(" AND open = ").push_bind(value);
        }
        if let Some(value) = filter.created_on {
            query.push(" AND created_on = ").push_bind(value);
        }
        if let Some(value) = filter.updated_on {
            query.push(" AND updated_on = ").push_bind(value);
        }
        query.push(" ORDER BY created_on ASC, id ASC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        rows.iter().map(row_to_issue).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Issue>, StoreError> {
        let row = sqlx::query(
            "SELECT id, project, issue_title, issue_text, created_by, assigned_to, \
             status_text, created_on, updated_on, open FROM issues WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.as_ref().map(row_to_issue).transpose()
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        changes: IssueChanges,
    ) -> Result<Option<Issue>, StoreError> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE issues SET updated_on = ");
        query.push_bind(changes.updated_on);
        if let Some(value) = changes.issue_title {
            query.push(", issue_title = ").push_bind(value);
        }
        if let Some(value) = changes.issue_text {
            query.push(", issue_text = ").push_bind(value);
        }
        if let Some(value) = changes.created_by {
            query.push(", created_by = ").push_bind(value);
        }
        if let Some(value) = changes.assigned_to {
            query.push(", assigned_to = ").push_bind(value);
        }
        if let Some(value) = changes.status_text {
            query.push(", status_text = ").push_bind(value);
        }
        if let Some(value) = changes.open {
            query.push(", open = ").push_bind(value);
        }
        query.push(" WHERE id = ");
        query.push_bind(id.to_string());

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM issues WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(result.rows_affected() > 0)
    }
}
