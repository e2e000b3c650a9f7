//! SqliteStore - SQLite WAL key-value backend for draft histories
//!
//! - WAL mode: readers never block the single writer
//! - One `kv_entries` table, upserted on every `put`
//! - Idempotent migration on open

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::error::{DraftscoreError, Result, ResultExt};
use crate::history::kv::KeyValueStore;

/// Row metadata, without the stored value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    pub key: String,
    /// UTF-8 length of the value in bytes
    pub size_bytes: i64,
    pub updated_at_ms: i64,
}

/// SQLite-backed [`KeyValueStore`]
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database in WAL mode.
    ///
    /// ```no_run
    /// use draftscore_core::history::SqliteStore;
    /// let store = SqliteStore::open(".draftscore/history.db").unwrap();
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(DraftscoreError::from)
                .with_context(|| format!("Creating database directory '{}'", parent.display()))?;
        }

        let conn = Connection::open(path)
            .map_err(DraftscoreError::from)
            .with_context(|| format!("Opening SQLite database '{}'", path.display()))?;

        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(DraftscoreError::from)
        .context("Configuring SQLite PRAGMAs")?;

        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "
            CREATE TABLE IF NOT EXISTS kv_entries (
                key           TEXT PRIMARY KEY,
                value         TEXT NOT NULL,
                updated_at_ms INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_kv_updated_at
                ON kv_entries(updated_at_ms DESC);
            ",
            )
            .map_err(DraftscoreError::from)
            .context("Migrating SQLite schema")
    }

    /// Keys with a given prefix, most recently updated first
    pub fn list_keys(&self, prefix: &str) -> Result<Vec<KeyInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT key, length(CAST(value AS BLOB)), updated_at_ms FROM kv_entries
             WHERE substr(key, 1, length(?1)) = ?1
             ORDER BY updated_at_ms DESC, key ASC",
        )?;

        let rows = stmt.query_map(params![prefix], |row| {
            Ok(KeyInfo {
                key: row.get(0)?,
                size_bytes: row.get(1)?,
                updated_at_ms: row.get(2)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(DraftscoreError::from)
            .context("Listing kv_entries")
    }

    /// Number of stored keys
    pub fn count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM kv_entries", [], |row| row.get(0))?)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(DraftscoreError::from)
            .with_context(|| format!("SELECT kv_entries '{}'", key))
    }

    fn put(&mut self, key: &str, value: String) -> Result<()> {
        let updated_at_ms = chrono::Utc::now().timestamp_millis();
        self.conn
            .execute(
                "INSERT INTO kv_entries (key, value, updated_at_ms) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at_ms = excluded.updated_at_ms",
                params![key, value, updated_at_ms],
            )
            .map_err(DraftscoreError::from)
            .with_context(|| format!("UPSERT kv_entries '{}'", key))?;
        Ok(())
    }
}
