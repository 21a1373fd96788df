//! Report summary rows and the report buckets they land in

use serde::{Deserialize, Serialize};

use crate::core::workbook::{Cell, Row};

/// Kind of control chart the batch was collected for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ChartType {
    /// X̄-R chart (averages and ranges)
    #[default]
    #[serde(rename = "X-R")]
    #[value(name = "X-R", alias = "xr", alias = "x-r")]
    XR,

    /// P chart (proportion defective)
    #[serde(rename = "P")]
    #[value(name = "P", alias = "p")]
    P,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::XR => "X-R",
            ChartType::P => "P",
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "X-R" | "XR" => Ok(ChartType::XR),
            "P" => Ok(ChartType::P),
            other => Err(format!("Unknown chart type: {}", other)),
        }
    }
}

/// The three report buckets every aggregation writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetKind {
    Weekly,
    Monthly,
    Yearly,
}

impl SheetKind {
    /// All buckets in the order they are written
    pub fn all() -> &'static [SheetKind] {
        &[SheetKind::Weekly, SheetKind::Monthly, SheetKind::Yearly]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SheetKind::Weekly => "Weekly",
            SheetKind::Monthly => "Monthly",
            SheetKind::Yearly => "Yearly",
        }
    }

    /// Whether this bucket carries the Average / Std Dev footer
    pub fn has_stats_footer(&self) -> bool {
        matches!(self, SheetKind::Yearly)
    }
}

impl std::fmt::Display for SheetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One summary row, created per aggregation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Local time of day, `HH:MM:SS`
    pub time: String,

    /// Week label, e.g. `W42`
    pub week: String,

    /// Full month name
    pub month: String,

    pub year: i32,

    pub chart_type: ChartType,

    /// Caller-supplied sample count (not necessarily the batch length)
    pub total_samples: usize,

    pub high_violations: usize,

    pub medium_violations: usize,

    /// Batch mean, rounded to 2 decimals
    pub average: f64,

    /// Batch population standard deviation, rounded to 2 decimals
    pub std_dev: f64,
}

impl ReportSummary {
    /// Render as a workbook row with the report's column order
    pub fn to_row(&self) -> Row {
        Row::new()
            .with("date", Cell::text(&self.date))
            .with("time", Cell::text(&self.time))
            .with("week", Cell::text(&self.week))
            .with("month", Cell::text(&self.month))
            .with("year", Cell::Int(i64::from(self.year)))
            .with("chartType", Cell::text(self.chart_type.as_str()))
            .with("totalSamples", Cell::Int(self.total_samples as i64))
            .with("highViolations", Cell::Int(self.high_violations as i64))
            .with("mediumViolations", Cell::Int(self.medium_violations as i64))
            .with("average", Cell::Number(self.average))
            .with("stdDev", Cell::Number(self.std_dev))
    }

    /// Footer rows appended after the summary in buckets that carry stats
    pub fn stats_footer(&self) -> [Row; 3] {
        [
            Row::new(),
            Row::new()
                .with("Metric", Cell::text("Average"))
                .with("Value", Cell::Number(self.average)),
            Row::new()
                .with("Metric", Cell::text("Std Dev"))
                .with("Value", Cell::Number(self.std_dev)),
        ]
    }
}
