//! Persistence for user-submitted corrections.
//!
//! Each submission is stored verbatim as a JSON blob keyed by the sentence
//! text; a later submission for the same text replaces the earlier one.
//! Nothing here feeds back into extraction.

use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("stored payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("store connection lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A stored submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub text: String,
    pub payload: Value,
    /// Seconds since the Unix epoch.
    pub submitted_at: u64,
}

pub struct SubmissionStore {
    conn: Mutex<Connection>,
}

impl SubmissionStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS submissions (
                text TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                submitted_at INTEGER NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Store `payload` under `text`, replacing any earlier submission.
    pub fn put(&self, text: &str, payload: &Value) -> Result<()> {
        let blob = serde_json::to_string(payload)?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        self.conn()?.execute(
            "INSERT INTO submissions (text, payload, submitted_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(text) DO UPDATE SET
                payload = excluded.payload,
                submitted_at = excluded.submitted_at",
            params![text, blob, now as i64],
        )?;

        tracing::debug!(text_len = text.len(), "Stored submission");
        Ok(())
    }

    pub fn get(&self, text: &str) -> Result<Option<Submission>> {
        let row = self
            .conn()?
            .query_row(
                "SELECT payload, submitted_at FROM submissions WHERE text = ?1",
                params![text],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        match row {
            Some((blob, submitted_at)) => Ok(Some(Submission {
                text: text.to_string(),
                payload: serde_json::from_str(&blob)?,
                submitted_at: submitted_at as u64,
            })),
            None => Ok(None),
        }
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM submissions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Cheap round trip used by health checks.
    pub fn ping(&self) -> Result<()> {
        self.conn()?.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}
