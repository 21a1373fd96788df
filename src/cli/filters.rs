//! Filter enums for CLI commands

use clap::ValueEnum;

use crate::entities::violation::Severity;

/// Severity filter for rule diagnostics
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum SeverityFilter {
    /// Spec-limit breaches only
    High,
    /// Control-limit breaches only
    Medium,
    /// Any breach (high or medium)
    Violations,
    /// Every sample - default
    #[default]
    All,
}

impl SeverityFilter {
    /// Check if a Severity matches this filter
    pub fn matches(&self, severity: &Severity) -> bool {
        match self {
            SeverityFilter::High => *severity == Severity::High,
            SeverityFilter::Medium => *severity == Severity::Medium,
            SeverityFilter::Violations => severity.is_violation(),
            SeverityFilter::All => true,
        }
    }
}

impl std::fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityFilter::High => write!(f, "high"),
            SeverityFilter::Medium => write!(f, "medium"),
            SeverityFilter::Violations => write!(f, "violations"),
            SeverityFilter::All => write!(f, "all"),
        }
    }
}
