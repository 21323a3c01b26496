//! Store seam and Postgres repository for update records.
//!
//! Every operation is a single statement. The replace transition is expressed
//! as one conditional UPDATE so concurrent replaces of the same row serialize
//! at the store instead of racing between a read and a write.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Update, UpdateStatus};

/// Fields for a new update record.
#[derive(Debug, Clone)]
pub struct NewUpdate {
    pub title: String,
    pub body: String,
    pub status: UpdateStatus,
}

/// Replacement fields for an existing update record.
#[derive(Debug, Clone)]
pub struct ReplaceUpdate {
    pub title: String,
    pub body: String,
    pub status: UpdateStatus,
}

/// Data-store operations needed by the handlers.
///
/// Constructed once by the hosting process and injected through shared state,
/// so tests can substitute an in-memory implementation.
#[async_trait]
pub trait UpdatesStore: Send + Sync {
    /// List every update regardless of status, newest-created first.
    async fn list_all(&self) -> Result<Vec<Update>, AppError>;

    /// List published updates, newest-published first, capped at `limit`.
    async fn list_published(&self, limit: i64) -> Result<Vec<Update>, AppError>;

    /// Insert a new update. Publishing at creation stamps `published_at`.
    async fn create(&self, new: NewUpdate) -> Result<Update, AppError>;

    /// Full-replace an update, applying the status transition rule to
    /// `published_at`. Returns `None` when no row matches the id.
    async fn replace(&self, id: Uuid, changes: ReplaceUpdate) -> Result<Option<Update>, AppError>;

    /// Physically delete an update. Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const UPDATE_COLUMNS: &str = "id, title, body, status, published_at, created_at, updated_at";

/// Postgres-backed store.
#[derive(Clone)]
pub struct Repository {
    pool: PgPool,
}

impl Repository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UpdatesStore for Repository {
    async fn list_all(&self) -> Result<Vec<Update>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {UPDATE_COLUMNS} FROM updates ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(update_from_row).collect())
    }

    async fn list_published(&self, limit: i64) -> Result<Vec<Update>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {UPDATE_COLUMNS} FROM updates \
             WHERE status = 'published' AND published_at IS NOT NULL \
             ORDER BY published_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(update_from_row).collect())
    }

    async fn create(&self, new: NewUpdate) -> Result<Update, AppError> {
        let row = sqlx::query(&format!(
            "INSERT INTO updates (title, body, status, published_at) \
             VALUES ($1, $2, $3, CASE WHEN $3 = 'published' THEN now() END) \
             RETURNING {UPDATE_COLUMNS}"
        ))
        .bind(&new.title)
        .bind(&new.body)
        .bind(new.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(update_from_row(&row))
    }

    async fn replace(&self, id: Uuid, changes: ReplaceUpdate) -> Result<Option<Update>, AppError> {
        // published_at transition in one statement: clear on draft, stamp on
        // first publish, keep as-is while already published.
        let row = sqlx::query(&format!(
            "UPDATE updates SET \
                title = $2, \
                body = $3, \
                status = $4, \
                published_at = CASE \
                    WHEN $4 = 'draft' THEN NULL \
                    WHEN published_at IS NULL THEN now() \
                    ELSE published_at \
                END \
             WHERE id = $1 \
             RETURNING {UPDATE_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.body)
        .bind(changes.status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(update_from_row))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM updates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn update_from_row(row: &PgRow) -> Update {
    let status: String = row.get("status");
    Update {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        // The CHECK constraint keeps the column within the known values.
        status: UpdateStatus::from_str(&status).unwrap_or(UpdateStatus::Draft),
        published_at: row.get("published_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
