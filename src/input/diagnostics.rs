//! Errors raised while reading sample input

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum InputError {
    #[error("Unsupported file format: {0}")]
    #[diagnostic(
        code(spc::input::unsupported_format),
        help("use a CSV (.csv), plain text (.txt) or Excel (.xlsx) file")
    )]
    UnsupportedFormat(PathBuf),

    #[error("Cannot read {path}: {source}")]
    #[diagnostic(code(spc::input::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read spreadsheet {path}: {source}")]
    #[diagnostic(
        code(spc::input::spreadsheet),
        help("samples are read from the first worksheet of an .xlsx workbook")
    )]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Malformed CSV: {0}")]
    #[diagnostic(code(spc::input::csv))]
    Csv(#[from] csv::Error),
}
