//! Workbook persistence
//!
//! The aggregator never touches the filesystem. Callers hand a workbook to a
//! [`WorkbookStore`] to keep it between runs, and use [`write_sheet_csv`] to
//! export a single report bucket for a spreadsheet tool.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::core::workbook::{Cell, Sheet, Workbook};

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("Workbook not found: {0}")]
    #[diagnostic(
        code(spc::store::not_found),
        help("run `spc report` first to create it")
    )]
    NotFound(PathBuf),

    #[error("I/O error on {path}: {source}")]
    #[diagnostic(code(spc::store::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid workbook {path}: {source}")]
    #[diagnostic(
        code(spc::store::parse),
        help("the file must be a workbook written by `spc report`")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot save {path}: {sheet}.{column} holds the non-finite value {value}")]
    #[diagnostic(
        code(spc::store::non_finite),
        help("JSON has no representation for infinity or NaN")
    )]
    NonFinite {
        path: PathBuf,
        sheet: String,
        column: String,
        value: f64,
    },

    #[error("CSV write error: {0}")]
    #[diagnostic(code(spc::store::csv))]
    Csv(#[from] csv::Error),
}

/// Capability to load and save whole workbooks
pub trait WorkbookStore {
    fn load(&self, path: &Path) -> Result<Workbook, StoreError>;

    fn save(&self, workbook: &Workbook, path: &Path) -> Result<(), StoreError>;

    /// Load a workbook, treating a missing file as an empty workbook
    fn load_or_empty(&self, path: &Path) -> Result<Workbook, StoreError> {
        match self.load(path) {
            Err(StoreError::NotFound(_)) => Ok(Workbook::new()),
            other => other,
        }
    }
}

/// Stores a workbook as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl WorkbookStore for JsonStore {
    fn load(&self, path: &Path) -> Result<Workbook, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let workbook = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded workbook");
        Ok(workbook)
    }

    fn save(&self, workbook: &Workbook, path: &Path) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        check_finite(workbook, path)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(workbook).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json + "\n").map_err(io_err)?;
        tracing::info!(path = %path.display(), sheets = workbook.sheets().len(), "saved workbook");
        Ok(())
    }
}

/// serde_json writes non-finite floats as `null`, which no `Cell` reads back
fn check_finite(workbook: &Workbook, path: &Path) -> Result<(), StoreError> {
    for sheet in workbook.sheets() {
        for row in &sheet.rows {
            for (column, cell) in row.iter() {
                if let Cell::Number(value) = cell {
                    if !value.is_finite() {
                        return Err(StoreError::NonFinite {
                            path: path.to_path_buf(),
                            sheet: sheet.name.clone(),
                            column: column.to_string(),
                            value: *value,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

/// Write one sheet as CSV
///
/// The header is the union of all row columns in first-seen order. Blank
/// separator rows become empty records so the layout matches the sheet.
pub fn write_sheet_csv<W: Write>(sheet: &Sheet, writer: W) -> Result<(), StoreError> {
    let columns = sheet.columns();
    let mut wtr = csv::WriterBuilder::new().flexible(false).from_writer(writer);

    if columns.is_empty() {
        wtr.flush().map_err(csv::Error::from)?;
        return Ok(());
    }

    wtr.write_record(&columns)?;
    for row in &sheet.rows {
        let record: Vec<String> = columns
            .iter()
            .map(|column| row.get(column).map(|c| c.to_string()).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// File name for a single-sheet export
///
/// `SPC_Report.json` + `Weekly` -> `SPC_Report_Weekly.csv`, next to the base.
pub fn sheet_file_name(base: &Path, sheet: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "SPC_Report".to_string());
    base.with_file_name(format!("{}_{}.csv", stem, sheet))
}
