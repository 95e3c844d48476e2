use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::{LocalStorage, StorageError};

/// SQLite-backed key/value store (one row per key).
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (or create) the store at `path`
    pub fn with_path<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a throwaway store that lives as long as the value
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.connection()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }

    /// When `key` was last written
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, StorageError> {
        let conn = self.connection()?;
        let updated_at = conn
            .query_row(
                "SELECT updated_at FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, DateTime<Utc>>(0),
            )
            .optional()?;
        Ok(updated_at)
    }

    /// Number of stored keys
    pub fn len(&self) -> Result<usize, StorageError> {
        let conn = self.connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl LocalStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT OR REPLACE INTO local_storage (key, value, updated_at)
             VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now()],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.connection()?;
        conn.execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_value() {
        let storage = SqliteStorage::in_memory().unwrap();

        storage.set_item("pytutor-theme", "light").unwrap();

        assert_eq!(
            storage.get_item("pytutor-theme").unwrap().as_deref(),
            Some("light")
        );
        assert!(storage.updated_at("pytutor-theme").unwrap().is_some());
    }

    #[test]
    fn set_overwrites_existing_key() {
        let storage = SqliteStorage::in_memory().unwrap();

        storage.set_item("student-name", "Ada").unwrap();
        storage.set_item("student-name", "Grace").unwrap();

        assert_eq!(
            storage.get_item("student-name").unwrap().as_deref(),
            Some("Grace")
        );
        assert_eq!(storage.len().unwrap(), 1);
    }

    #[test]
    fn missing_key_is_none() {
        let storage = SqliteStorage::in_memory().unwrap();

        assert_eq!(storage.get_item("nope").unwrap(), None);
        assert_eq!(storage.updated_at("nope").unwrap(), None);
    }

    #[test]
    fn remove_item_deletes_key() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.set_item("student-id", "2020CS001").unwrap();

        storage.remove_item("student-id").unwrap();

        assert_eq!(storage.get_item("student-id").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pytutor.db");

        {
            let storage = SqliteStorage::with_path(&path).unwrap();
            storage.set_item("pytutor-theme", "dark").unwrap();
        }

        let reopened = SqliteStorage::with_path(&path).unwrap();
        assert_eq!(
            reopened.get_item("pytutor-theme").unwrap().as_deref(),
            Some("dark")
        );
    }
}
