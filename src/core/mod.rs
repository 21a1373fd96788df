//! Core module - rule engine, statistics and report aggregation

pub mod config;
pub mod period;
pub mod report;
pub mod rules;
pub mod stats;
pub mod store;
pub mod workbook;

pub use config::{Config, ConfigError};
pub use period::{week_number, TimeMetadata};
pub use report::{aggregate, aggregate_at, generate_report, summarize, ReportOptions};
pub use rules::{count_severity, evaluate, evaluate_sample};
pub use stats::{batch_stats, BatchStats};
pub use store::{sheet_file_name, write_sheet_csv, JsonStore, StoreError, WorkbookStore};
pub use workbook::{Cell, Row, Sheet, Workbook, WorkbookError};
