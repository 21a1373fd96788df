//! `spc report` command - evaluate a batch and merge it into the report workbook

use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::cli::helpers::log_violations;
use crate::cli::output::{print_json, print_yaml};
use crate::cli::table::render_row;
use crate::cli::{GlobalOpts, LimitArgs, OutputFormat, SampleArgs};
use crate::core::config::Config;
use crate::core::report::{generate_report, ReportOptions};
use crate::core::rules::evaluate;
use crate::core::store::{write_sheet_csv, JsonStore, WorkbookStore};
use crate::core::workbook::{Sheet, Workbook};
use crate::entities::summary::{ChartType, SheetKind};

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: SampleArgs,

    #[command(flatten)]
    pub limits: LimitArgs,

    /// Chart type recorded in the summary row
    #[arg(long, short = 't')]
    pub chart_type: Option<ChartType>,

    /// Workbook file to merge into
    #[arg(long, short = 'w', env = "SPC_WORKBOOK")]
    pub workbook: Option<PathBuf>,

    /// Ignore any existing workbook and start from an empty one
    #[arg(long)]
    pub fresh: bool,

    /// Aggregate without writing the workbook back
    #[arg(long)]
    pub no_save: bool,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let limits = args.limits.resolve(&config);
    let samples = args.input.load()?;
    if samples.is_empty() {
        tracing::warn!("no numeric samples in input, recording an empty batch");
    }

    let records = evaluate(&samples, &limits);
    log_violations(&records);

    let path = args.workbook.unwrap_or_else(|| config.report_file());
    let chart_type = args.chart_type.unwrap_or_else(|| config.chart_type());
    let store = JsonStore;

    let workbook = if args.fresh {
        Workbook::new()
    } else {
        store.load_or_empty(&path)?
    };

    let options = ReportOptions {
        file_name: path.clone(),
        auto_save: !args.no_save,
    };
    let workbook = generate_report(
        &options,
        workbook,
        &records,
        samples.len(),
        chart_type,
        &store,
    )?;

    let weekly = workbook.rows(SheetKind::Weekly.as_str());
    let Some(summary) = weekly.last() else {
        return Err(miette::miette!("Report aggregation produced no summary row"));
    };

    match global.format {
        OutputFormat::Json => print_json(summary)?,
        OutputFormat::Yaml => print_yaml(summary)?,
        OutputFormat::Csv => {
            let sheet = Sheet::new("Summary", vec![summary.clone()]);
            write_sheet_csv(&sheet, std::io::stdout().lock())?;
        }
        OutputFormat::Table | OutputFormat::Auto => {
            println!("{}", render_row(summary));
            println!();
            for kind in SheetKind::all() {
                println!(
                    "  {:<8} {} rows",
                    kind.as_str(),
                    style(workbook.rows(kind.as_str()).len()).cyan()
                );
            }
            println!();
            if options.auto_save {
                println!(
                    "{} Report saved to {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            } else {
                println!("{} Report not saved (--no-save)", style("•").dim());
            }
        }
    }

    Ok(())
}
