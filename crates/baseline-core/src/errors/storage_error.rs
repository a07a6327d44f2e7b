//! Settings-store errors.

use super::PeriodError;

/// Errors from the settings store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("invalid persisted new code period: {0}")]
    InvalidSetting(#[from] PeriodError),
}
