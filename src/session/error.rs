use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Failed to encode session value: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Failed to acquire storage lock")]
    FailedToAcquireStorageLock,
}
