//! Versioned schema migrations gated on `PRAGMA user_version`.

pub mod v001_initial;

use baseline_core::errors::StorageError;
use rusqlite::Connection;
use tracing::debug;

/// Current schema version.
pub const SCHEMA_VERSION: i64 = 1;

/// Run all outstanding migrations on the given connection.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let version: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    if version < 1 {
        conn.execute_batch(v001_initial::MIGRATION_SQL)
            .map_err(|e| StorageError::SqliteError {
                message: e.to_string(),
            })?;
        debug!("applied migration v001");
    }

    if version < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(|e| StorageError::SqliteError {
                message: e.to_string(),
            })?;
    }

    Ok(())
}
