//! New code period domain types and analysis-scoped state.

pub mod holder;
pub mod new_code_period;
pub mod resolved;

pub use holder::PeriodHolder;
pub use new_code_period::{NewCodePeriod, NewCodePeriodKind};
pub use resolved::Period;
