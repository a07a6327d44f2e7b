//! Period holder contract violations.

/// Violations of the write-once period holder contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HolderError {
    #[error("new code period has already been set for this analysis")]
    AlreadySet,

    #[error("new code period has not been set yet")]
    NotSet,
}
