//! Shared helper functions for CLI commands

use std::io::{self, IsTerminal};

use crate::entities::violation::{Severity, ViolationRecord};
use crate::input::{read_samples_csv, InputError};

/// Format a measured value for display
///
/// Whole numbers print without decimals, everything else with up to 4
/// significant decimals and trailing zeros removed.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.4}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Format an optional limit, showing "–" when it is not configured
pub fn format_limit(limit: Option<f64>) -> String {
    limit.map(format_value).unwrap_or_else(|| "–".to_string())
}

/// Read samples from stdin if it is piped (Unix philosophy support)
///
/// Returns `None` when stdin is a terminal, so the caller can ask for input
/// instead of blocking. This enables pipelines like:
/// ```bash
/// cut -d, -f3 measurements.csv | spc eval --usl 20 --lsl 0
/// ```
pub fn read_samples_from_stdin() -> Option<Result<Vec<f64>, InputError>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    Some(read_samples_csv(stdin.lock()))
}

/// Emit one log event per record
///
/// Spec-limit breaches log at `error`, control-limit breaches at `warn` and
/// in-limit samples at `debug`.
pub fn log_violations(records: &[ViolationRecord]) {
    for record in records {
        match record.severity {
            Severity::High => tracing::error!(
                index = record.index,
                sample = record.sample,
                severity = %record.severity,
                "Sample {} ({}) – {}",
                record.index,
                format_value(record.sample),
                record.describe()
            ),
            Severity::Medium => tracing::warn!(
                index = record.index,
                sample = record.sample,
                severity = %record.severity,
                "Sample {} ({}) – {}",
                record.index,
                format_value(record.sample),
                record.describe()
            ),
            Severity::None => tracing::debug!(
                index = record.index,
                sample = record.sample,
                "Sample {} ({}) – {}",
                record.index,
                format_value(record.sample),
                record.describe()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(25.0), "25");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(1.63), "1.63");
        assert_eq!(format_value(0.123456), "0.1235");
        assert_eq!(format_value(2.50), "2.5");
    }

    #[test]
    fn test_format_limit() {
        assert_eq!(format_limit(Some(20.0)), "20");
        assert_eq!(format_limit(None), "–");
    }
}
