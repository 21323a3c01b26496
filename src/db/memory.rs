//! In-memory store used by the integration tests.
//!
//! Mirrors the repository semantics and doubles as a spy: it counts every
//! store operation (so auth-gating tests can assert nothing was touched) and
//! can be switched into a failing mode to exercise the store-error path.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Update, UpdateStatus};

use super::{NewUpdate, ReplaceUpdate, UpdatesStore};

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Update>>,
    ops: AtomicUsize,
    fail: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations performed so far.
    pub fn op_count(&self) -> usize {
        self.ops.load(Ordering::SeqCst)
    }

    /// Make every subsequent operation fail with a store error.
    pub fn fail_all(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Seed a row directly, bypassing the op counter.
    pub fn seed(&self, update: Update) {
        self.rows.lock().unwrap().push(update);
    }

    fn record_op(&self) -> Result<(), AppError> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database("injected store failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UpdatesStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Update>, AppError> {
        self.record_op()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_published(&self, limit: i64) -> Result<Vec<Update>, AppError> {
        self.record_op()?;
        let mut rows: Vec<Update> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.status == UpdateStatus::Published && u.published_at.is_some())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn create(&self, new: NewUpdate) -> Result<Update, AppError> {
        self.record_op()?;
        let now = Utc::now();
        let update = Update {
            id: Uuid::new_v4(),
            title: new.title,
            body: new.body,
            status: new.status,
            published_at: (new.status == UpdateStatus::Published).then_some(now),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(update.clone());
        Ok(update)
    }

    async fn replace(&self, id: Uuid, changes: ReplaceUpdate) -> Result<Option<Update>, AppError> {
        self.record_op()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        let now = Utc::now();
        row.title = changes.title;
        row.body = changes.body;
        row.published_at = match changes.status {
            UpdateStatus::Draft => None,
            UpdateStatus::Published => row.published_at.or(Some(now)),
        };
        row.status = changes.status;
        row.updated_at = now;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.record_op()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok(rows.len() < before)
    }
}
