//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! Mutations go through a lazily opened transaction that `save()` commits.
//! Dropping the pool with uncommitted work rolls it back.

use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open (or create) the database at `path` and bring its schema up to date.
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::prepare(conn)
    }

    /// Private in-memory database, used by tests.
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn)
    }

    fn prepare(conn: Connection) -> AppResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        run_pending_migrations(&conn).map_err(|e| AppError::Migration(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Start a transaction unless one is already open.
    pub(crate) fn begin_if_needed(&self) -> rusqlite::Result<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        Ok(())
    }

    /// Commit the pending transaction, if any.
    pub(crate) fn commit(&self) -> rusqlite::Result<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.conn.is_autocommit()
    }
}

impl Drop for DbPool {
    fn drop(&mut self) {
        if !self.conn.is_autocommit() {
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incompatible_schema_is_a_migration_error() {
        let path = std::env::temp_dir().join("sitecycle_pool_bad_schema.sqlite");
        std::fs::remove_file(&path).ok();
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE locations (id INTEGER PRIMARY KEY);")
                .unwrap();
        }

        let result = DbPool::new(&path.to_string_lossy());
        assert!(matches!(result, Err(AppError::Migration(_))));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn fresh_database_has_no_open_transaction() {
        let pool = DbPool::in_memory().unwrap();
        assert!(!pool.has_pending_changes());
    }
}
