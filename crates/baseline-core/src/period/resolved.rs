//! The materialized period an analysis is measured against.

use super::NewCodePeriodKind;

/// A concrete period matched against the analysis history.
///
/// Produced by the period resolver; the rest of the pipeline reads it
/// through the `PeriodHolder` and never reinterprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    mode: NewCodePeriodKind,
    param: Option<String>,
    date_ms: Option<i64>,
}

impl Period {
    /// Create a period for the given mode, with the parameter and snapshot
    /// date the resolver matched.
    pub fn new(mode: NewCodePeriodKind, param: Option<String>, date_ms: Option<i64>) -> Self {
        Self {
            mode,
            param,
            date_ms,
        }
    }

    /// The definition kind this period was materialized from.
    pub fn mode(&self) -> NewCodePeriodKind {
        self.mode
    }

    /// The parameter of the matched definition, if any.
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// The snapshot date in milliseconds since the Unix epoch, if the mode
    /// anchors to one.
    pub fn date_ms(&self) -> Option<i64> {
        self.date_ms
    }
}
