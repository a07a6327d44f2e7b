//! Configuration for the baseline engine.
//! TOML-based: env overrides > project config > compiled defaults.

pub mod baseline_config;
pub mod storage_config;

pub use baseline_config::BaselineConfig;
pub use storage_config::StorageConfig;
