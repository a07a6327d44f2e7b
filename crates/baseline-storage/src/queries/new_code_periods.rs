//! Queries for the new_code_periods table — at most one setting per scope.
//!
//! Absence is a normal outcome: every select returns `Ok(None)` when the
//! scope has no configured setting.

use baseline_core::errors::StorageError;
use baseline_core::period::NewCodePeriod;
use rusqlite::{params, Connection, OptionalExtension};

/// Select the branch-level setting for (project, branch).
pub fn select_by_branch(
    conn: &Connection,
    project_uuid: &str,
    branch_uuid: &str,
) -> Result<Option<NewCodePeriod>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT kind, value FROM new_code_periods
             WHERE project_uuid = ?1 AND branch_uuid = ?2",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let row = stmt
        .query_row(params![project_uuid, branch_uuid], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })
        .optional()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    reassemble(row)
}

/// Select the project-level setting (no branch scope).
pub fn select_by_project(
    conn: &Connection,
    project_uuid: &str,
) -> Result<Option<NewCodePeriod>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT kind, value FROM new_code_periods
             WHERE project_uuid = ?1 AND branch_uuid IS NULL",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let row = stmt
        .query_row(params![project_uuid], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })
        .optional()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    reassemble(row)
}

/// Select the global setting.
pub fn select_global(conn: &Connection) -> Result<Option<NewCodePeriod>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT kind, value FROM new_code_periods
             WHERE project_uuid IS NULL AND branch_uuid IS NULL",
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    let row = stmt
        .query_row([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })
        .optional()
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    reassemble(row)
}

/// Set the branch-level setting for (project, branch), replacing any
/// existing one.
pub fn upsert_branch(
    conn: &Connection,
    project_uuid: &str,
    branch_uuid: &str,
    period: &NewCodePeriod,
    updated_at: i64,
) -> Result<(), StorageError> {
    let updated = conn
        .execute(
            "UPDATE new_code_periods SET kind = ?1, value = ?2, updated_at = ?3
             WHERE project_uuid = ?4 AND branch_uuid = ?5",
            params![
                period.kind().as_str(),
                period.value(),
                updated_at,
                project_uuid,
                branch_uuid
            ],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    if updated == 0 {
        conn.execute(
            "INSERT INTO new_code_periods (project_uuid, branch_uuid, kind, value, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                project_uuid,
                branch_uuid,
                period.kind().as_str(),
                period.value(),
                updated_at
            ],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    }
    Ok(())
}

/// Set the project-level setting, replacing any existing one.
pub fn upsert_project(
    conn: &Connection,
    project_uuid: &str,
    period: &NewCodePeriod,
    updated_at: i64,
) -> Result<(), StorageError> {
    let updated = conn
        .execute(
            "UPDATE new_code_periods SET kind = ?1, value = ?2, updated_at = ?3
             WHERE project_uuid = ?4 AND branch_uuid IS NULL",
            params![
                period.kind().as_str(),
                period.value(),
                updated_at,
                project_uuid
            ],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    if updated == 0 {
        conn.execute(
            "INSERT INTO new_code_periods (project_uuid, branch_uuid, kind, value, updated_at)
             VALUES (?1, NULL, ?2, ?3, ?4)",
            params![
                project_uuid,
                period.kind().as_str(),
                period.value(),
                updated_at
            ],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    }
    Ok(())
}

/// Set the global setting, replacing any existing one.
pub fn upsert_global(
    conn: &Connection,
    period: &NewCodePeriod,
    updated_at: i64,
) -> Result<(), StorageError> {
    let updated = conn
        .execute(
            "UPDATE new_code_periods SET kind = ?1, value = ?2, updated_at = ?3
             WHERE project_uuid IS NULL AND branch_uuid IS NULL",
            params![period.kind().as_str(), period.value(), updated_at],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;

    if updated == 0 {
        conn.execute(
            "INSERT INTO new_code_periods (project_uuid, branch_uuid, kind, value, updated_at)
             VALUES (NULL, NULL, ?1, ?2, ?3)",
            params![period.kind().as_str(), period.value(), updated_at],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    }
    Ok(())
}

/// Remove the branch-level setting. Returns whether a row was removed.
pub fn delete_branch(
    conn: &Connection,
    project_uuid: &str,
    branch_uuid: &str,
) -> Result<bool, StorageError> {
    let removed = conn
        .execute(
            "DELETE FROM new_code_periods
             WHERE project_uuid = ?1 AND branch_uuid = ?2",
            params![project_uuid, branch_uuid],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(removed > 0)
}

/// Remove the project-level setting. Returns whether a row was removed.
pub fn delete_project(conn: &Connection, project_uuid: &str) -> Result<bool, StorageError> {
    let removed = conn
        .execute(
            "DELETE FROM new_code_periods
             WHERE project_uuid = ?1 AND branch_uuid IS NULL",
            params![project_uuid],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(removed > 0)
}

/// Remove the global setting. Returns whether a row was removed.
pub fn delete_global(conn: &Connection) -> Result<bool, StorageError> {
    let removed = conn
        .execute(
            "DELETE FROM new_code_periods
             WHERE project_uuid IS NULL AND branch_uuid IS NULL",
            [],
        )
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(removed > 0)
}

/// Count stored settings across all scopes.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM new_code_periods", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

fn reassemble(
    row: Option<(String, Option<String>)>,
) -> Result<Option<NewCodePeriod>, StorageError> {
    row.map(|(kind, value)| NewCodePeriod::from_parts(&kind, value.as_deref()))
        .transpose()
        .map_err(StorageError::from)
}
