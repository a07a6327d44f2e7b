//! The load-period step: selects the effective new code period definition
//! for the current analysis and publishes the materialized period.

use baseline_core::errors::StepError;
use baseline_core::messages::TaskMessages;
use baseline_core::period::{NewCodePeriod, NewCodePeriodKind, PeriodHolder};
use baseline_core::traits::Clock;
use baseline_storage::queries::new_code_periods;
use baseline_storage::DatabaseManager;
use tracing::warn;

use crate::context::AnalysisContext;
use crate::resolver::PeriodResolver;

const CONFLICT_NOTICE: &str = "The analysis declares a new code reference branch, \
     but a new code period is already configured for this project. \
     Check the configuration to make sure this is intended.";

/// Resolves the new code period for the current analysis and publishes it
/// into the period holder.
///
/// Selection order: scanner override, then branch-level setting, then
/// project-level, then global, then the built-in default. The branch and
/// project lookups stop at the first hit, and the global lookup only runs
/// when neither an override nor a specific setting exists.
pub struct LoadPeriodStep<'a> {
    db: &'a DatabaseManager,
    context: &'a AnalysisContext,
    resolver: &'a dyn PeriodResolver,
    holder: &'a PeriodHolder,
    messages: &'a TaskMessages,
    clock: &'a dyn Clock,
}

impl<'a> LoadPeriodStep<'a> {
    pub fn new(
        db: &'a DatabaseManager,
        context: &'a AnalysisContext,
        resolver: &'a dyn PeriodResolver,
        holder: &'a PeriodHolder,
        messages: &'a TaskMessages,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            db,
            context,
            resolver,
            holder,
            messages,
            clock,
        }
    }

    /// Human-readable step description for pipeline reporting.
    pub fn description(&self) -> &'static str {
        "Load new code period"
    }

    /// Execute the step. Publishes exactly one value into the period
    /// holder; resolver failures propagate before anything is published.
    pub fn execute(&self) -> Result<(), StepError> {
        if !self.context.branch_analysis {
            self.holder.set_period(None)?;
            return Ok(());
        }

        let project_uuid = self.context.project_uuid.as_str();
        let branch_uuid = self.context.branch_uuid.as_str();
        let project_version = self.context.project_version.as_str();

        let override_period = self
            .context
            .reference_override()
            .map(|branch| NewCodePeriod::ReferenceBranch(branch.to_string()));

        let period = self.db.with_reader(|conn| {
            let specific =
                match new_code_periods::select_by_branch(conn, project_uuid, branch_uuid)? {
                    Some(setting) => Some(setting),
                    None => new_code_periods::select_by_project(conn, project_uuid)?,
                };

            let effective = match override_period {
                None => {
                    let effective = match specific {
                        Some(setting) => setting,
                        None => new_code_periods::select_global(conn)?.unwrap_or_default(),
                    };
                    // A first analysis has no earlier snapshot to measure
                    // against unless it is anchored to another branch.
                    if self.context.first_analysis
                        && effective.kind() != NewCodePeriodKind::ReferenceBranch
                    {
                        return Ok(None);
                    }
                    effective
                }
                Some(override_period) => {
                    if specific.is_some() {
                        warn!(
                            branch = branch_uuid,
                            "scanner reference branch overrides a persisted new code period"
                        );
                        self.messages.add(CONFLICT_NOTICE, self.clock.now_ms());
                    }
                    override_period
                }
            };

            self.resolver
                .resolve(conn, branch_uuid, &effective, project_version)
                .map(Some)
                .map_err(StepError::from)
        })?;

        self.holder.set_period(period)?;
        Ok(())
    }
}
