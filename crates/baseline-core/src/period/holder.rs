//! Write-once holder for the resolved period of the current analysis.

use std::sync::Mutex;

use crate::errors::HolderError;

use super::Period;

enum State {
    Unset,
    Set(Option<Period>),
}

/// Analysis-scoped, write-once container for the resolved period.
///
/// `None` is a valid resolved value ("this analysis has no period") and is
/// distinct from the unset state. A second write within the same analysis
/// is a contract violation, not a silent overwrite.
pub struct PeriodHolder {
    state: Mutex<State>,
}

impl PeriodHolder {
    /// Create an unset holder for a new analysis.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Unset),
        }
    }

    /// Publish the resolved period. Callable exactly once per analysis.
    pub fn set_period(&self, period: Option<Period>) -> Result<(), HolderError> {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match *state {
            State::Unset => {
                *state = State::Set(period);
                Ok(())
            }
            State::Set(_) => Err(HolderError::AlreadySet),
        }
    }

    /// The resolved period, or `None` when this analysis has no period.
    /// Fails if the period has not been published yet.
    pub fn period(&self) -> Result<Option<Period>, HolderError> {
        let state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match &*state {
            State::Unset => Err(HolderError::NotSet),
            State::Set(period) => Ok(period.clone()),
        }
    }

    /// Whether a concrete period was published for this analysis.
    pub fn has_period(&self) -> Result<bool, HolderError> {
        Ok(self.period()?.is_some())
    }

    /// Whether the period (possibly `None`) has been published.
    pub fn is_initialized(&self) -> bool {
        let state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        matches!(&*state, State::Set(_))
    }
}

impl Default for PeriodHolder {
    fn default() -> Self {
        Self::new()
    }
}
