//! Command-line argument definitions

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use miette::Result;

use crate::cli::commands::{
    chart::ChartArgs, completions::CompletionsArgs, eval::EvalArgs, export::ExportArgs,
    init::InitArgs, report::ReportArgs,
};
use crate::cli::helpers::read_samples_from_stdin;
use crate::core::Config;
use crate::entities::limits::{LimitInput, LimitSet, RawLimits};
use crate::input::{parse_sample_list, read_samples_file};

/// SPC Report - statistical process control from the command line
///
/// Evaluate sample measurements against specification and control limits,
/// chart them, and roll them up into weekly, monthly and yearly reports.
#[derive(Parser, Debug)]
#[command(name = "spc", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a project config in .spc/
    Init(InitArgs),

    /// Evaluate samples against spec and control limits
    Eval(EvalArgs),

    /// Evaluate samples and merge a summary into the report workbook
    Report(ReportArgs),

    /// Export one report sheet (Weekly, Monthly or Yearly) as CSV
    Export(ExportArgs),

    /// Draw an X̄ control chart in the terminal
    Chart(ChartArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Each command's human view (tables, or the chart for `spc chart`)
    #[default]
    Auto,
    Table,
    Json,
    Yaml,
    Csv,
}

/// Where samples come from
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SampleArgs {
    /// Comma-separated sample values, e.g. "10.2, 11, 9.8"
    #[arg(long, short = 's', allow_hyphen_values = true)]
    pub samples: Option<String>,

    /// Read samples from a CSV, text or Excel (.xlsx) file
    #[arg(long, short = 'i')]
    pub file: Option<PathBuf>,
}

impl SampleArgs {
    /// Collect samples from the flags, or from piped stdin when no flag is given
    pub fn load(&self) -> Result<Vec<f64>> {
        let mut samples = Vec::new();

        if let Some(ref text) = self.samples {
            samples.extend(parse_sample_list(text));
        }
        if let Some(ref path) = self.file {
            samples.extend(read_samples_file(path)?);
        }

        if self.samples.is_none() && self.file.is_none() {
            match read_samples_from_stdin() {
                Some(result) => samples.extend(result?),
                None => {
                    return Err(miette::miette!(
                        help = "use --samples \"1,2,3\", --file data.csv, or pipe values on stdin",
                        "No samples given"
                    ))
                }
            }
        }

        Ok(samples)
    }
}

/// Threshold flags; values that are not numbers leave the limit unset
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LimitArgs {
    /// Upper specification limit
    #[arg(long, allow_hyphen_values = true)]
    pub usl: Option<String>,

    /// Lower specification limit
    #[arg(long, allow_hyphen_values = true)]
    pub lsl: Option<String>,

    /// Upper control limit
    #[arg(long, allow_hyphen_values = true)]
    pub ucl: Option<String>,

    /// Lower control limit
    #[arg(long, allow_hyphen_values = true)]
    pub lcl: Option<String>,
}

impl LimitArgs {
    pub fn raw(&self) -> RawLimits {
        let input = |v: &Option<String>| v.clone().map(LimitInput::Text);
        RawLimits {
            usl: input(&self.usl),
            lsl: input(&self.lsl),
            ucl: input(&self.ucl),
            lcl: input(&self.lcl),
        }
    }

    /// Config defaults overlaid with whatever was given on the command line
    pub fn resolve(&self, config: &Config) -> LimitSet {
        config.limits.clone().merged_with(&self.raw()).resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_auto_format_help_names_human_view() {
        let value = OutputFormat::Auto.to_possible_value().unwrap();
        let help = value.get_help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("human view"));
        assert!(!help.contains("YAML"));
    }

    #[test]
    fn test_limit_args_override_config() {
        let config = Config {
            limits: RawLimits {
                usl: Some(20.0.into()),
                lcl: Some(2.0.into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let args = LimitArgs {
            usl: Some("25".to_string()),
            lcl: Some(String::new()),
            ..Default::default()
        };
        // An explicit empty value clears the configured limit
        assert_eq!(args.resolve(&config), LimitSet::new(Some(25.0), None, None, None));
    }

    #[test]
    fn test_parse_eval_command() {
        let cli = Cli::try_parse_from([
            "spc", "eval", "--samples", "5,15,25", "--usl", "20", "--lcl", "-2", "-f", "json",
        ])
        .unwrap();
        assert_eq!(cli.global.format, OutputFormat::Json);
        match cli.command {
            Commands::Eval(args) => {
                assert_eq!(args.input.samples.as_deref(), Some("5,15,25"));
                assert_eq!(args.limits.usl.as_deref(), Some("20"));
                assert_eq!(args.limits.lcl.as_deref(), Some("-2"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
