//! The configured definition of what counts as "new" code.

use std::fmt;

use crate::errors::PeriodError;

/// A new code period definition: how the baseline for "new" code is bounded.
///
/// Parameterised variants keep their value as the free-form string the user
/// configured; interpreting it (day counts, dates, version names) belongs to
/// the period resolver, not to this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewCodePeriod {
    /// New code is anything analysed within the given number of days.
    NumberOfDays(String),
    /// New code is anything analysed after the given date.
    Date(String),
    /// New code is anything newer than the named version.
    Version(String),
    /// New code is anything newer than the previous version.
    PreviousVersion,
    /// New code is anything newer than the identified analysis.
    SpecificAnalysis(String),
    /// New code is anything not already on the named branch.
    ReferenceBranch(String),
}

impl NewCodePeriod {
    /// Reassemble a definition from its persisted parts.
    ///
    /// Parameterised kinds reject a missing or blank value; kinds that take
    /// no parameter ignore whatever value is stored alongside them.
    pub fn from_parts(kind: &str, value: Option<&str>) -> Result<Self, PeriodError> {
        let kind = NewCodePeriodKind::parse(kind)?;
        if !kind.requires_value() {
            return Ok(Self::PreviousVersion);
        }
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(PeriodError::MissingValue { kind })?
            .to_string();
        Ok(match kind {
            NewCodePeriodKind::NumberOfDays => Self::NumberOfDays(value),
            NewCodePeriodKind::Date => Self::Date(value),
            NewCodePeriodKind::Version => Self::Version(value),
            NewCodePeriodKind::SpecificAnalysis => Self::SpecificAnalysis(value),
            NewCodePeriodKind::ReferenceBranch => Self::ReferenceBranch(value),
            NewCodePeriodKind::PreviousVersion => Self::PreviousVersion,
        })
    }

    /// The kind tag of this definition.
    pub fn kind(&self) -> NewCodePeriodKind {
        match self {
            Self::NumberOfDays(_) => NewCodePeriodKind::NumberOfDays,
            Self::Date(_) => NewCodePeriodKind::Date,
            Self::Version(_) => NewCodePeriodKind::Version,
            Self::PreviousVersion => NewCodePeriodKind::PreviousVersion,
            Self::SpecificAnalysis(_) => NewCodePeriodKind::SpecificAnalysis,
            Self::ReferenceBranch(_) => NewCodePeriodKind::ReferenceBranch,
        }
    }

    /// The configured value, for kinds that carry one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::NumberOfDays(v)
            | Self::Date(v)
            | Self::Version(v)
            | Self::SpecificAnalysis(v)
            | Self::ReferenceBranch(v) => Some(v),
            Self::PreviousVersion => None,
        }
    }
}

/// The fallback definition used when nothing is configured at any level.
impl Default for NewCodePeriod {
    fn default() -> Self {
        Self::PreviousVersion
    }
}

/// Kind tags for new code period definitions, with their canonical storage
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewCodePeriodKind {
    NumberOfDays,
    Date,
    Version,
    PreviousVersion,
    SpecificAnalysis,
    ReferenceBranch,
}

impl NewCodePeriodKind {
    /// The canonical storage name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NumberOfDays => "NUMBER_OF_DAYS",
            Self::Date => "DATE",
            Self::Version => "VERSION",
            Self::PreviousVersion => "PREVIOUS_VERSION",
            Self::SpecificAnalysis => "SPECIFIC_ANALYSIS",
            Self::ReferenceBranch => "REFERENCE_BRANCH",
        }
    }

    /// Parse a canonical storage name.
    pub fn parse(s: &str) -> Result<Self, PeriodError> {
        match s {
            "NUMBER_OF_DAYS" => Ok(Self::NumberOfDays),
            "DATE" => Ok(Self::Date),
            "VERSION" => Ok(Self::Version),
            "PREVIOUS_VERSION" => Ok(Self::PreviousVersion),
            "SPECIFIC_ANALYSIS" => Ok(Self::SpecificAnalysis),
            "REFERENCE_BRANCH" => Ok(Self::ReferenceBranch),
            other => Err(PeriodError::UnknownKind(other.to_string())),
        }
    }

    /// Whether definitions of this kind carry a configured value.
    pub fn requires_value(self) -> bool {
        !matches!(self, Self::PreviousVersion)
    }
}

impl fmt::Display for NewCodePeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
