//! `spc export` command - write one report sheet as CSV

use std::fs::File;
use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::config::Config;
use crate::core::store::{sheet_file_name, write_sheet_csv, JsonStore, WorkbookStore};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Sheet to export (Weekly, Monthly or Yearly)
    pub sheet: String,

    /// Workbook file to read
    #[arg(long, short = 'w', env = "SPC_WORKBOOK")]
    pub workbook: Option<PathBuf>,

    /// Output file (default: <workbook stem>_<sheet>.csv next to the workbook)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> Result<()> {
    let path = args
        .workbook
        .unwrap_or_else(|| Config::load().report_file());

    let workbook = JsonStore.load(&path)?;
    let extracted = workbook.extract_sheet(&args.sheet)?;

    let output = args
        .output
        .unwrap_or_else(|| sheet_file_name(&path, &args.sheet));

    for sheet in extracted.sheets() {
        let file = File::create(&output).into_diagnostic()?;
        write_sheet_csv(sheet, file)?;
        tracing::info!(sheet = %sheet.name, rows = sheet.rows.len(), path = %output.display(), "exported sheet");
    }

    println!(
        "{} {} report exported to {}",
        style("✓").green(),
        args.sheet,
        style(output.display()).cyan()
    );

    Ok(())
}
