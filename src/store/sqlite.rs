//! SQLite-backed entry store
//!
//! One `entries` table with an index on `created_at` for the windowed read.
//! Every successful mutation publishes a [`ChangeEvent`] on a broadcast
//! channel; subscribers re-fetch rather than patch, so a dropped event only
//! costs one refresh.

use std::path::Path;

use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

use super::error::{StoreError, StoreResult};
use super::types::{now_ms, ChangeEvent, CodeSlot, Entry, NewEntry};
use super::EntryStore;

/// Capacity of the change-event broadcast channel
const CHANGE_CHANNEL_CAPACITY: usize = 256;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS entries (
    id          TEXT PRIMARY KEY,
    user_name   TEXT NOT NULL,
    code_1      TEXT NOT NULL DEFAULT '',
    code_2      TEXT NOT NULL DEFAULT '',
    code_3      TEXT NOT NULL DEFAULT '',
    is_used_1   INTEGER NOT NULL DEFAULT 0,
    is_used_2   INTEGER NOT NULL DEFAULT 0,
    is_used_3   INTEGER NOT NULL DEFAULT 0,
    message     TEXT NOT NULL,
    created_at  INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_entries_created_at ON entries (created_at);
";

/// Entry store backed by SQLite
pub struct SqliteStore {
    conn: Mutex<Connection>,
    changes: broadcast::Sender<ChangeEvent>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store (used by tests and throwaway setups)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        Ok(Self {
            conn: Mutex::new(conn),
            changes,
        })
    }

    /// Total number of rows, active or not
    pub async fn entry_count(&self) -> StoreResult<usize> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn publish(&self, event: ChangeEvent) {
        // No subscribers is fine; the send only fails when nobody listens
        let _ = self.changes.send(event);
    }

    fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<Entry> {
        Ok(Entry {
            id: row.get(0)?,
            user_name: row.get(1)?,
            code_1: row.get(2)?,
            code_2: row.get(3)?,
            code_3: row.get(4)?,
            is_used_1: row.get::<_, i64>(5)? != 0,
            is_used_2: row.get::<_, i64>(6)? != 0,
            is_used_3: row.get::<_, i64>(7)? != 0,
            message: row.get(8)?,
            created_at: row.get(9)?,
        })
    }
}

#[async_trait]
impl EntryStore for SqliteStore {
    async fn recent_since(&self, cutoff_ms: i64) -> StoreResult<Vec<Entry>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT id, user_name, code_1, code_2, code_3,
                    is_used_1, is_used_2, is_used_3, message, created_at
             FROM entries
             WHERE created_at > ?1
             ORDER BY created_at DESC",
        )?;

        let rows = stmt.query_map(params![cutoff_ms], Self::row_to_entry)?;
        let entries = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(entries)
    }

    async fn insert(&self, new: NewEntry) -> StoreResult<Entry> {
        let entry = Entry {
            id: Uuid::new_v4().to_string(),
            user_name: new.user_name,
            code_1: new.code_1,
            code_2: new.code_2,
            code_3: new.code_3,
            is_used_1: false,
            is_used_2: false,
            is_used_3: false,
            message: new.message,
            created_at: now_ms(),
        };

        {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO entries
                    (id, user_name, code_1, code_2, code_3,
                     is_used_1, is_used_2, is_used_3, message, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, 0, 0, ?6, ?7)",
                params![
                    entry.id,
                    entry.user_name,
                    entry.code_1,
                    entry.code_2,
                    entry.code_3,
                    entry.message,
                    entry.created_at,
                ],
            )?;
        }

        tracing::debug!(entry_id = %entry.id, user = %entry.user_name, "Entry inserted");
        self.publish(ChangeEvent::inserted(&entry.id));

        Ok(entry)
    }

    async fn set_code_used(&self, id: &str, slot: CodeSlot, used: bool) -> StoreResult<()> {
        let updated = {
            let conn = self.conn.lock().await;
            // Column name comes from a fixed slot enum, not user input
            let sql = format!(
                "UPDATE entries SET {} = ?1 WHERE id = ?2",
                slot.used_column()
            );
            conn.execute(&sql, params![used as i64, id])?
        };

        if updated == 0 {
            return Err(StoreError::EntryNotFound(id.to_string()));
        }

        tracing::debug!(entry_id = %id, slot = %slot, used, "Used-flag updated");
        self.publish(ChangeEvent::updated(id));

        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }
}
