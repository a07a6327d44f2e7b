//! Error handling for baseline.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod holder_error;
pub mod period_error;
pub mod resolve_error;
pub mod step_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use holder_error::HolderError;
pub use period_error::PeriodError;
pub use resolve_error::ResolveError;
pub use step_error::StepError;
pub use storage_error::StorageError;
