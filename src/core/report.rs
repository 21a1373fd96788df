//! Report aggregator - roll evaluated batches into periodic report sheets
//!
//! Every call appends exactly one summary row to each of the `Weekly`,
//! `Monthly` and `Yearly` sheets of the workbook it is given. Prior rows are
//! read from that workbook; nothing is cached between calls.

use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};

use crate::core::period::TimeMetadata;
use crate::core::rules::count_severity;
use crate::core::stats::batch_stats;
use crate::core::store::{StoreError, WorkbookStore};
use crate::core::workbook::Workbook;
use crate::entities::summary::{ChartType, ReportSummary, SheetKind};
use crate::entities::violation::{Severity, ViolationRecord};

/// Default report file name
pub const DEFAULT_REPORT_FILE: &str = "SPC_Report.json";

/// Options for [`generate_report`]
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Where the workbook is saved when `auto_save` is set
    pub file_name: PathBuf,

    /// Hand the workbook to the store after aggregation
    pub auto_save: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            file_name: PathBuf::from(DEFAULT_REPORT_FILE),
            auto_save: true,
        }
    }
}

/// Build the summary row for a batch at a given moment
pub fn summarize<Tz: TimeZone>(
    batch: &[ViolationRecord],
    sample_count: usize,
    chart_type: ChartType,
    now: &DateTime<Tz>,
) -> ReportSummary {
    let meta = TimeMetadata::at(now);
    let samples: Vec<f64> = batch.iter().map(|r| r.sample).collect();
    let stats = batch_stats(&samples);

    tracing::debug!(
        date = %meta.date,
        week = meta.week,
        month = %meta.month,
        year = meta.year,
        "report period"
    );

    ReportSummary {
        week: meta.week_label(),
        date: meta.date,
        time: meta.time,
        month: meta.month,
        year: meta.year,
        chart_type,
        total_samples: sample_count,
        high_violations: count_severity(batch, Severity::High),
        medium_violations: count_severity(batch, Severity::Medium),
        average: stats.average,
        std_dev: stats.std_dev,
    }
}

/// Merge one summary row into a sheet, adding the stats footer where the
/// sheet kind carries one
pub fn append_summary(workbook: &mut Workbook, kind: SheetKind, summary: &ReportSummary) {
    let mut rows = workbook.rows(kind.as_str()).to_vec();
    rows.push(summary.to_row());
    if kind.has_stats_footer() {
        rows.extend(summary.stats_footer());
    }
    tracing::debug!(sheet = %kind, rows = rows.len(), "merged summary row");
    workbook.put_sheet(kind.as_str(), rows);
}

/// Aggregate a batch into the workbook at the current local time
pub fn aggregate(
    workbook: Workbook,
    batch: &[ViolationRecord],
    sample_count: usize,
    chart_type: ChartType,
) -> Workbook {
    aggregate_at(workbook, batch, sample_count, chart_type, &Local::now())
}

/// Aggregate a batch into the workbook at a given moment
pub fn aggregate_at<Tz: TimeZone>(
    mut workbook: Workbook,
    batch: &[ViolationRecord],
    sample_count: usize,
    chart_type: ChartType,
    now: &DateTime<Tz>,
) -> Workbook {
    let summary = summarize(batch, sample_count, chart_type, now);
    for kind in SheetKind::all() {
        append_summary(&mut workbook, *kind, &summary);
    }
    workbook
}

/// Aggregate a batch and optionally persist the result
///
/// The workbook is returned whether or not it was saved, so callers can route
/// it elsewhere (for example a single-sheet export). Store failures propagate.
pub fn generate_report(
    options: &ReportOptions,
    workbook: Workbook,
    batch: &[ViolationRecord],
    sample_count: usize,
    chart_type: ChartType,
    store: &dyn WorkbookStore,
) -> Result<Workbook, StoreError> {
    let workbook = aggregate(workbook, batch, sample_count, chart_type);
    if options.auto_save {
        store.save(&workbook, &options.file_name)?;
    }
    Ok(workbook)
}
