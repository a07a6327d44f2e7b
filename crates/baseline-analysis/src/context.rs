//! Read-only metadata about the analysis being processed.

/// Metadata for the analysis under way, owned by the pipeline driver.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// Whether the analysis target is a branch (vs. the main component).
    pub branch_analysis: bool,
    /// Whether this is the first-ever analysis of the branch.
    pub first_analysis: bool,
    /// Scanner-supplied reference branch overriding persisted settings.
    pub reference_branch_override: Option<String>,
    /// Unique identifier of the branch under analysis.
    pub branch_uuid: String,
    /// Unique identifier of the project the branch belongs to.
    pub project_uuid: String,
    /// Declared version of the analysed sources.
    pub project_version: String,
}

impl AnalysisContext {
    /// The scanner override, filtered to non-blank values.
    pub fn reference_override(&self) -> Option<&str> {
        self.reference_branch_override
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}
