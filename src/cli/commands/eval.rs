//! `spc eval` command - check samples against spec and control limits

use console::style;
use miette::Result;

use crate::cli::filters::SeverityFilter;
use crate::cli::helpers::{format_limit, format_value, log_violations};
use crate::cli::output::{effective_format, print_json, print_yaml, write_csv};
use crate::cli::table::render_diagnostics;
use crate::cli::{GlobalOpts, LimitArgs, OutputFormat, SampleArgs};
use crate::core::config::Config;
use crate::core::rules::{count_severity, evaluate, violations};
use crate::entities::limits::LimitSet;
use crate::entities::violation::{Severity, ViolationRecord};

#[derive(clap::Args, Debug)]
pub struct EvalArgs {
    #[command(flatten)]
    pub input: SampleArgs,

    #[command(flatten)]
    pub limits: LimitArgs,

    /// Which records to show
    #[arg(long, default_value = "all")]
    pub severity: SeverityFilter,
}

pub fn run(args: EvalArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let limits = args.limits.resolve(&config);
    let samples = args.input.load()?;

    let records = evaluate(&samples, &limits);
    log_violations(&records);

    let shown: Vec<&ViolationRecord> = records
        .iter()
        .filter(|r| args.severity.matches(&r.severity))
        .collect();

    match effective_format(global.format, true) {
        OutputFormat::Json => print_json(&shown)?,
        OutputFormat::Yaml => print_yaml(&shown)?,
        OutputFormat::Csv => write_csv(&shown, std::io::stdout().lock())?,
        OutputFormat::Table | OutputFormat::Auto => {
            print_limits(&limits);
            if shown.is_empty() {
                println!("No samples match --severity {}", args.severity);
            } else {
                println!("{}", render_diagnostics(shown.iter().copied()));
            }
            println!();
            println!(
                "{} samples, {} high, {} medium",
                style(records.len()).cyan(),
                style(count_severity(&records, Severity::High)).red(),
                style(count_severity(&records, Severity::Medium)).yellow()
            );
            println!("{}", status_line(&records));
        }
    }

    Ok(())
}

fn print_limits(limits: &LimitSet) {
    println!(
        "USL={}  LSL={}  UCL={}  LCL={}",
        format_limit(limits.usl),
        format_limit(limits.lsl),
        format_limit(limits.ucl),
        format_limit(limits.lcl)
    );
}

/// One-line verdict on the batch, based on its most recent violation
pub fn status_line(records: &[ViolationRecord]) -> String {
    match violations(records).last() {
        None => "✅ Process looks stable. No violations so far.".to_string(),
        Some(last) => {
            let text = format!(
                "Last violation: Sample {} ({}) – {}",
                last.index,
                format_value(last.sample),
                last.describe()
            );
            match last.severity {
                Severity::High => style(text).red().bold().to_string(),
                _ => style(text).yellow().to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_stable() {
        let records = evaluate(&[5.0, 6.0], &LimitSet::new(Some(20.0), None, None, None));
        assert_eq!(
            status_line(&records),
            "✅ Process looks stable. No violations so far."
        );
    }

    #[test]
    fn test_status_line_reports_last_violation() {
        let limits = LimitSet::new(Some(20.0), None, Some(18.0), Some(2.0));
        let records = evaluate(&[25.0, 19.0, 5.0], &limits);
        let line = console::strip_ansi_codes(&status_line(&records)).to_string();
        assert_eq!(line, "Last violation: Sample 2 (19) – above UCL");
    }
}
