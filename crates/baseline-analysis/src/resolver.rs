//! Seam for the period materializer.

use baseline_core::errors::ResolveError;
use baseline_core::period::{NewCodePeriod, Period};
use rusqlite::Connection;

/// Matches an effective new code period definition against the analysis
/// history, producing the concrete period for this analysis.
///
/// Implementations run inside the step's store session: the connection
/// handed in is the one the settings lookups used, and it is released when
/// the step exits, on success and on failure alike.
pub trait PeriodResolver {
    /// Resolve `period` for the given branch, or fail with a user-facing
    /// error when no snapshot matches the definition.
    fn resolve(
        &self,
        conn: &Connection,
        branch_uuid: &str,
        period: &NewCodePeriod,
        project_version: &str,
    ) -> Result<Period, ResolveError>;
}
