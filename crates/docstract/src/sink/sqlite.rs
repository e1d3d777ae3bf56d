//! SQLite document store

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::sink::DocumentSink;

/// A row from the document store, for the stats endpoint
#[derive(Debug, Clone, serde::Serialize)]
pub struct SavedDocument {
    /// Row id
    pub id: i64,
    /// Original filename
    pub filename: String,
    /// When the save happened
    pub saved_at: DateTime<Utc>,
}

/// Insert-only store for extracted documents
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::persistence(format!("Failed to open database: {}", e)))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::persistence(format!("Failed to open in-memory database: {}", e)))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::persistence(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS extracted_texts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT NOT NULL,
                content TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_extracted_texts_filename
                ON extracted_texts(filename);
        "#,
        )
        .map_err(|e| Error::persistence(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }

    /// Number of saved documents
    pub fn count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM extracted_texts", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Most recently saved documents, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<SavedDocument>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, filename, saved_at FROM extracted_texts
             ORDER BY id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            let saved_at: String = row.get(2)?;
            Ok(SavedDocument {
                id: row.get(0)?,
                filename: row.get(1)?,
                saved_at: saved_at.parse().unwrap_or_else(|_| Utc::now()),
            })
        })?;

        Ok(rows.filter_map(|r| r.ok()).collect())
    }
}

impl DocumentSink for SqliteStore {
    fn persist(&self, filename: &str, content: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO extracted_texts (filename, content, saved_at) VALUES (?1, ?2, ?3)",
            params![filename, content, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
