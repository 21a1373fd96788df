//! Violation records produced by the rule engine

use serde::{Deserialize, Serialize};

/// Outcome of a single threshold comparison
///
/// `Unknown` means the limit was not configured, so the rule never ran.
/// Serialized as `null` / `true` / `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Flag {
    #[default]
    Unknown,
    /// The sample crossed the limit
    Tripped,
    /// The limit was checked and the sample is on the right side of it
    Clear,
}

impl Flag {
    /// Compare against an optional limit
    pub fn check(limit: Option<f64>, crossed: impl FnOnce(f64) -> bool) -> Self {
        match limit {
            None => Flag::Unknown,
            Some(limit) if crossed(limit) => Flag::Tripped,
            Some(_) => Flag::Clear,
        }
    }

    pub fn is_tripped(&self) -> bool {
        *self == Flag::Tripped
    }

    pub fn is_unknown(&self) -> bool {
        *self == Flag::Unknown
    }

    /// Single-character marker for diagnostics tables
    pub fn symbol(&self) -> &'static str {
        match self {
            Flag::Unknown => "–",
            Flag::Tripped => "✗",
            Flag::Clear => "✓",
        }
    }
}

impl From<Option<bool>> for Flag {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Flag::Unknown,
            Some(true) => Flag::Tripped,
            Some(false) => Flag::Clear,
        }
    }
}

impl From<Flag> for Option<bool> {
    fn from(flag: Flag) -> Self {
        match flag {
            Flag::Unknown => None,
            Flag::Tripped => Some(true),
            Flag::Clear => Some(false),
        }
    }
}

/// Severity of a sample; variants are ordered so `High` is the maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    None,
    Medium,
    High,
}

impl Severity {
    pub fn is_violation(&self) -> bool {
        *self != Severity::None
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::None => write!(f, "None"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

/// Per-sample result of a rule evaluation
///
/// Deserialization recomputes `severity` from the flags, so a stored record
/// can never disagree with itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordFields")]
pub struct ViolationRecord {
    /// The measured value
    pub sample: f64,

    /// 1-based position within the evaluated batch
    pub index: usize,

    #[serde(rename = "aboveUSL")]
    pub above_usl: Flag,

    #[serde(rename = "aboveUCL")]
    pub above_ucl: Flag,

    #[serde(rename = "belowLSL")]
    pub below_lsl: Flag,

    #[serde(rename = "belowLCL")]
    pub below_lcl: Flag,

    pub severity: Severity,
}

impl ViolationRecord {
    /// Build a record, deriving severity from the four flags
    pub fn new(
        sample: f64,
        index: usize,
        above_usl: Flag,
        above_ucl: Flag,
        below_lsl: Flag,
        below_lcl: Flag,
    ) -> Self {
        let severity = severity_of(above_usl, above_ucl, below_lsl, below_lcl);
        Self {
            sample,
            index,
            above_usl,
            above_ucl,
            below_lsl,
            below_lcl,
            severity,
        }
    }

    /// Human-readable list of tripped rules, spec limits first
    pub fn describe(&self) -> String {
        let tripped: Vec<&str> = [
            (self.above_usl, "above USL"),
            (self.below_lsl, "below LSL"),
            (self.above_ucl, "above UCL"),
            (self.below_lcl, "below LCL"),
        ]
        .into_iter()
        .filter(|(flag, _)| flag.is_tripped())
        .map(|(_, label)| label)
        .collect();

        if tripped.is_empty() {
            "within limits".to_string()
        } else {
            tripped.join(", ")
        }
    }
}

/// Wire form of a record; any `severity` in the input is ignored
#[derive(Deserialize)]
struct RecordFields {
    sample: f64,
    index: usize,
    #[serde(rename = "aboveUSL", default)]
    above_usl: Flag,
    #[serde(rename = "aboveUCL", default)]
    above_ucl: Flag,
    #[serde(rename = "belowLSL", default)]
    below_lsl: Flag,
    #[serde(rename = "belowLCL", default)]
    below_lcl: Flag,
}

impl From<RecordFields> for ViolationRecord {
    fn from(f: RecordFields) -> Self {
        ViolationRecord::new(f.sample, f.index, f.above_usl, f.above_ucl, f.below_lsl, f.below_lcl)
    }
}

/// Spec-limit breaches are High, control-limit breaches Medium, else None
pub fn severity_of(above_usl: Flag, above_ucl: Flag, below_lsl: Flag, below_lcl: Flag) -> Severity {
    if above_usl.is_tripped() || below_lsl.is_tripped() {
        Severity::High
    } else if above_ucl.is_tripped() || below_lcl.is_tripped() {
        Severity::Medium
    } else {
        Severity::None
    }
}
