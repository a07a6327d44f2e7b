//! Errors for malformed new code period definitions.

use crate::period::NewCodePeriodKind;

/// A persisted new code period definition that cannot be reassembled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("unknown new code period kind '{0}'")]
    UnknownKind(String),

    #[error("new code period kind '{kind}' requires a value")]
    MissingValue { kind: NewCodePeriodKind },
}
