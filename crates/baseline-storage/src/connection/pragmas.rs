//! Connection pragmas for the settings store.

use baseline_core::errors::StorageError;
use rusqlite::Connection;

/// Apply pragmas for the read-write connection.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}

/// Apply pragmas for a pooled read-only connection.
pub fn apply_read_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA query_only = ON;
         PRAGMA busy_timeout = 5000;",
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}
