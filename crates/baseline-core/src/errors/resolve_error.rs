//! Period resolver errors.

use super::StorageError;

/// Failures materializing an effective new code period definition against
/// the analysis history.
///
/// `NoMatchingSnapshot` messages are surfaced to the end user verbatim and
/// abort the analysis.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("{message}")]
    NoMatchingSnapshot { message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
