use {
    crate::session::{error::StorageError, storage::KeyValueStore},
    rusqlite::{Connection, OptionalExtension, params},
    std::sync::{Mutex, MutexGuard},
};

/// Key-value slots kept in a single SQLite table.
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        Self::from_connection(Connection::open(db_path)?)
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        let store = SqliteKeyValueStore {
            conn: Mutex::new(conn),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<(), StorageError> {
        self.acquire_connection()?.execute(
            "CREATE TABLE IF NOT EXISTS session_slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn acquire_connection(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::FailedToAcquireStorageLock)
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.acquire_connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM session_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.acquire_connection()?.execute(
            "INSERT INTO session_slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.acquire_connection()?
            .execute("DELETE FROM session_slots WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_overwrite_remove() {
        let store = SqliteKeyValueStore::in_memory().unwrap();

        assert_eq!(store.get("slot").unwrap(), None);

        store.set("slot", "one").unwrap();
        store.set("slot", "two").unwrap();
        assert_eq!(store.get("slot").unwrap().as_deref(), Some("two"));

        store.remove("slot").unwrap();
        store.remove("slot").unwrap();
        assert_eq!(store.get("slot").unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let path = std::env::temp_dir().join(format!(
            "wafr-session-test-{}.db",
            std::process::id()
        ));
        let path = path.to_string_lossy().to_string();
        let _ = std::fs::remove_file(&path);

        {
            let store = SqliteKeyValueStore::new(&path).unwrap();
            store.set("wafr.session.authenticated", "true").unwrap();
        }

        let reopened = SqliteKeyValueStore::new(&path).unwrap();
        assert_eq!(
            reopened.get("wafr.session.authenticated").unwrap().as_deref(),
            Some("true")
        );

        drop(reopened);
        let _ = std::fs::remove_file(&path);
    }
}
