//! Rule engine - classify samples against spec and control limits
//!
//! Four strict threshold comparisons per sample. A sample sitting exactly on a
//! limit does not violate it. Limits that are not configured leave their flag
//! `Unknown` for the whole batch and never contribute to severity.

use crate::entities::limits::LimitSet;
use crate::entities::violation::{Flag, Severity, ViolationRecord};

/// Evaluate every sample of a batch against the limit set
///
/// Output has the same length and order as the input; `index` is the 1-based
/// position inside this batch.
pub fn evaluate(samples: &[f64], limits: &LimitSet) -> Vec<ViolationRecord> {
    samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| evaluate_sample(sample, i + 1, limits))
        .collect()
}

/// Evaluate a single sample at a given 1-based index
pub fn evaluate_sample(sample: f64, index: usize, limits: &LimitSet) -> ViolationRecord {
    ViolationRecord::new(
        sample,
        index,
        Flag::check(limits.usl, |usl| sample > usl),
        Flag::check(limits.ucl, |ucl| sample > ucl),
        Flag::check(limits.lsl, |lsl| sample < lsl),
        Flag::check(limits.lcl, |lcl| sample < lcl),
    )
}

/// Count records of a given severity
pub fn count_severity(records: &[ViolationRecord], severity: Severity) -> usize {
    records.iter().filter(|r| r.severity == severity).count()
}

/// Records that tripped at least one rule
pub fn violations(records: &[ViolationRecord]) -> impl Iterator<Item = &ViolationRecord> {
    records.iter().filter(|r| r.severity.is_violation())
}
