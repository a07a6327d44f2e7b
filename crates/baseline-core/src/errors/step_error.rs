//! Analysis-step errors.

use super::{HolderError, ResolveError, StorageError};

/// Errors that can occur while executing the load-period step.
/// Resolver failures pass through unwrapped.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Period holder error: {0}")]
    Holder(#[from] HolderError),
}
