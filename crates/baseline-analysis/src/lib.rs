//! Analysis-step layer: resolves the new code period for one analysis.

pub mod context;
pub mod resolver;
pub mod step;

pub use context::AnalysisContext;
pub use resolver::PeriodResolver;
pub use step::LoadPeriodStep;
