//! Durable store for the recommendation engine
//!
//! One `Store` owns the SQLite connection and is the only path to durable
//! state. Callers hold the handle explicitly - there is no process-wide
//! database path, and no per-call open/close. The engine serializes all
//! mutating calls behind this single owner; concurrent writers are out of
//! scope by design.
//!
//! Operations are split by concern:
//! - `catalog` - video rows and their increment-only counters
//! - `profiles` - user preference documents
//! - `interactions` - append-only watch/like/recommendation logs and the
//!   analytic queries over them

mod catalog;
mod interactions;
mod profiles;

use crate::db::SqliteDatabase;
use anyhow::{Context, Result};
use std::path::Path;

/// Store owning the SQLite handle for all five tables
pub struct Store {
    db: SqliteDatabase,
}

impl Store {
    /// Open or create the store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = SqliteDatabase::open(path).context("Failed to open recommendation store")?;
        let mut store = Self { db };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store for testing
    pub fn open_in_memory() -> Result<Self> {
        let db = SqliteDatabase::open_in_memory()?;
        let mut store = Self { db };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the schema atomically
    fn init_schema(&mut self) -> Result<()> {
        let tx = self.db.connection_mut().transaction()?;

        tx.execute(
            "CREATE TABLE IF NOT EXISTS videos (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                tags TEXT,
                category TEXT,
                duration INTEGER,
                upload_date TEXT,
                views INTEGER DEFAULT 0,
                likes INTEGER DEFAULT 0,
                creator TEXT,
                embedding BLOB
            )",
            [],
        )?;

        tx.execute(
            "CREATE TABLE IF NOT EXISTS user_profiles (
                user_id TEXT PRIMARY KEY,
                preferences TEXT,
                created_at TEXT,
                updated_at TEXT
            )",
            [],
        )?;

        tx.execute(
            "CREATE TABLE IF NOT EXISTS watch_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT,
                video_id TEXT,
                timestamp TEXT,
                rating REAL
            )",
            [],
        )?;

        tx.execute(
            "CREATE TABLE IF NOT EXISTS liked_videos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT,
                video_id TEXT,
                timestamp TEXT
            )",
            [],
        )?;

        tx.execute(
            "CREATE TABLE IF NOT EXISTS recommendation_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT,
                video_id TEXT,
                recommendation_score REAL,
                timestamp TEXT,
                recommendation_type TEXT
            )",
            [],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Get reference to underlying database
    pub fn database(&self) -> &SqliteDatabase {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_creation() -> Result<()> {
        let store = Store::open_in_memory()?;

        let tables: Vec<String> = {
            let mut stmt = store
                .database()
                .connection()
                .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
            let rows = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        for table in [
            "liked_videos",
            "recommendation_logs",
            "user_profiles",
            "videos",
            "watch_history",
        ] {
            assert!(tables.iter().any(|t| t == table), "missing table {}", table);
        }

        Ok(())
    }

    #[test]
    fn test_store_reopen_is_idempotent() -> Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("recs.db");

        {
            let store = Store::open(&path)?;
            store.database().execute(
                "INSERT INTO videos (id, title) VALUES (?, ?)",
                &[&"v1", &"First"],
            )?;
        }

        // Second open must not clobber existing rows
        let store = Store::open(&path)?;
        let count: i64 = store
            .database()
            .connection()
            .query_row("SELECT COUNT(*) FROM videos", [], |row| row.get(0))?;
        assert_eq!(count, 1);

        Ok(())
    }
}
