//! Table rendering for terminal output

use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::format_value;
use crate::core::workbook::Row;
use crate::entities::violation::ViolationRecord;

/// One line of the rule diagnostics table
#[derive(Tabled)]
struct DiagnosticRow {
    #[tabled(rename = "SAMPLE")]
    index: usize,
    #[tabled(rename = "VALUE")]
    value: String,
    #[tabled(rename = "ABOVE USL")]
    above_usl: &'static str,
    #[tabled(rename = "ABOVE UCL")]
    above_ucl: &'static str,
    #[tabled(rename = "BELOW LSL")]
    below_lsl: &'static str,
    #[tabled(rename = "BELOW LCL")]
    below_lcl: &'static str,
    #[tabled(rename = "SEVERITY")]
    severity: String,
}

impl From<&ViolationRecord> for DiagnosticRow {
    fn from(record: &ViolationRecord) -> Self {
        Self {
            index: record.index,
            value: format_value(record.sample),
            above_usl: record.above_usl.symbol(),
            above_ucl: record.above_ucl.symbol(),
            below_lsl: record.below_lsl.symbol(),
            below_lcl: record.below_lcl.symbol(),
            severity: record.severity.to_string(),
        }
    }
}

/// Render the per-sample rule diagnostics
pub fn render_diagnostics<'a>(records: impl IntoIterator<Item = &'a ViolationRecord>) -> String {
    let rows: Vec<DiagnosticRow> = records.into_iter().map(DiagnosticRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render one workbook row as a two-column table
pub fn render_row(row: &Row) -> String {
    let mut builder = Builder::default();
    builder.push_record(["FIELD", "VALUE"]);
    for (column, cell) in row.iter() {
        builder.push_record([column.to_string(), cell.to_string()]);
    }
    builder.build().with(Style::rounded()).to_string()
}
