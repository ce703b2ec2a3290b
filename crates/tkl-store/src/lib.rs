pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod validate;

pub use error::StoreError;

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Conventional page size for `list_by_group` callers.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Hard cap on a single `list_by_group` page; larger limits are clamped.
pub const MAX_LIST_LIMIT: u32 = 1000;

/// Append-only store for chat messages, one logical partition per group.
///
/// Uniqueness of (group_id, message_id) is enforced by the schema's primary
/// key; within a group, messages are totally ordered by (timestamp,
/// message_id). Stored messages are immutable — there is no update or delete
/// path, retention belongs to an external process.
pub struct MessageStore {
    conn: Mutex<Connection>,
}

impl MessageStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("cannot open {}: {e}", path.display())))?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Message store opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store, mainly for tests. Same schema, no durability.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Unavailable(format!("cannot open in-memory db: {e}")))?;

        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Idempotent schema setup, safe to call at every process startup.
    /// `open` already runs it; calling again is a no-op.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.with_conn(migrations::run)
    }

    pub(crate) fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("connection lock poisoned: {e}")))?;
        f(&conn)
    }
}
