//! SQLite-backed key-value store.
//!
//! Holds the persisted streak state in a single `kv` table, one row per key,
//! so the layout matches the browser storage the app was designed around.

use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection};

use super::{data_dir, KvStore};
use crate::error::{Result, StorageError};

/// How long a writer waits for another process holding the write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite database holding the `kv` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the store at `<data_dir>/microadventure.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("microadventure.db");
        Ok(Self::open_at(path)?)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Wraps `f` in `BEGIN IMMEDIATE`, so a second process blocks (up to the
    /// busy timeout) instead of interleaving its read with ours.
    fn transaction<T, F>(&mut self, f: F) -> (T, Result<(), StorageError>)
    where
        F: FnOnce(&mut Self) -> (T, Result<(), StorageError>),
    {
        if let Err(e) = self.conn.execute_batch("BEGIN IMMEDIATE") {
            tracing::warn!("could not begin transaction, continuing unguarded: {e}");
            let (value, written) = f(self);
            return (value, written.and(Err(e.into())));
        }

        let (value, written) = f(self);
        let finished = match written {
            Ok(()) => self.conn.execute_batch("COMMIT").map_err(|e| {
                // A failed COMMIT leaves the transaction open.
                self.rollback();
                StorageError::from(e)
            }),
            Err(e) => {
                self.rollback();
                Err(e)
            }
        };
        (value, finished)
    }
}

impl SqliteStore {
    fn rollback(&self) {
        if self.conn.is_autocommit() {
            return;
        }
        if let Err(e) = self.conn.execute_batch("ROLLBACK") {
            tracing::warn!("rollback failed: {e}");
        }
    }
}
