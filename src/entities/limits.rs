//! Limit set - specification and control thresholds for a batch of samples
//!
//! Each of the four limits is optional. A missing limit means the matching
//! rule is not evaluated at all, which is different from the rule passing.

use serde::{Deserialize, Serialize};

/// A raw limit as entered by a user or read from config
///
/// Config files may carry plain numbers while the command line always hands
/// over text, so both are accepted and resolved the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LimitInput {
    Number(f64),
    Text(String),
}

impl LimitInput {
    /// Resolve to a usable threshold, or `None` when the input is not numeric
    pub fn resolve(&self) -> Option<f64> {
        match self {
            LimitInput::Number(n) if n.is_nan() => None,
            LimitInput::Number(n) => Some(*n),
            LimitInput::Text(s) => parse_leading_float(s),
        }
    }
}

impl From<f64> for LimitInput {
    fn from(value: f64) -> Self {
        LimitInput::Number(value)
    }
}

impl From<&str> for LimitInput {
    fn from(value: &str) -> Self {
        LimitInput::Text(value.to_string())
    }
}

impl From<String> for LimitInput {
    fn from(value: String) -> Self {
        LimitInput::Text(value)
    }
}

/// Unresolved limits, one optional input per threshold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usl: Option<LimitInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lsl: Option<LimitInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ucl: Option<LimitInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcl: Option<LimitInput>,
}

impl RawLimits {
    /// Resolve every input; unparseable values become absent limits
    pub fn resolve(&self) -> LimitSet {
        let resolve = |input: &Option<LimitInput>| input.as_ref().and_then(LimitInput::resolve);
        LimitSet {
            usl: resolve(&self.usl),
            lsl: resolve(&self.lsl),
            ucl: resolve(&self.ucl),
            lcl: resolve(&self.lcl),
        }
    }

    /// Overlay `other` on top of `self`, field by field
    pub fn merged_with(mut self, other: &RawLimits) -> RawLimits {
        if other.usl.is_some() {
            self.usl = other.usl.clone();
        }
        if other.lsl.is_some() {
            self.lsl = other.lsl.clone();
        }
        if other.ucl.is_some() {
            self.ucl = other.ucl.clone();
        }
        if other.lcl.is_some() {
            self.lcl = other.lcl.clone();
        }
        self
    }
}

/// Resolved thresholds used by the rule engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitSet {
    /// Upper specification limit
    pub usl: Option<f64>,

    /// Lower specification limit
    pub lsl: Option<f64>,

    /// Upper control limit
    pub ucl: Option<f64>,

    /// Lower control limit
    pub lcl: Option<f64>,
}

impl LimitSet {
    pub fn new(usl: Option<f64>, lsl: Option<f64>, ucl: Option<f64>, lcl: Option<f64>) -> Self {
        Self { usl, lsl, ucl, lcl }
    }

    /// A limit set with nothing configured
    pub fn none() -> Self {
        Self::default()
    }

    /// True when no limit is configured
    pub fn is_empty(&self) -> bool {
        self.usl.is_none() && self.lsl.is_none() && self.ucl.is_none() && self.lcl.is_none()
    }
}

/// Parse the longest numeric prefix of `input`
///
/// Leading whitespace is skipped and trailing garbage is ignored, so
/// `"12.5 mm"` yields `12.5` while `"mm"` and `""` yield `None`.
/// `Infinity` (optionally signed) is accepted.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
