//! Output formatting utilities

use std::io::Write;

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Table
            } else {
                OutputFormat::Yaml
            }
        }
        other => other,
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

/// Print any serializable value as YAML
pub fn print_yaml<T: Serialize>(value: &T) -> Result<()> {
    let yaml = serde_yml::to_string(value).into_diagnostic()?;
    print!("{}", yaml);
    Ok(())
}

/// Write a list of flat records as CSV with a header row
pub fn write_csv<T: Serialize, W: Write>(records: &[T], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record).into_diagnostic()?;
    }
    wtr.flush().into_diagnostic()?;
    Ok(())
}
