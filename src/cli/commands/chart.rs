//! `spc chart` command - X̄ control chart in the terminal

use miette::Result;

use crate::cli::output::{print_json, print_yaml};
use crate::cli::viz::{out_of_control, render_control_chart, CHART_HEIGHT, CHART_WIDTH};
use crate::cli::{GlobalOpts, LimitArgs, OutputFormat, SampleArgs};
use crate::core::config::Config;
use crate::core::stats::mean;

#[derive(clap::Args, Debug)]
pub struct ChartArgs {
    #[command(flatten)]
    pub input: SampleArgs,

    #[command(flatten)]
    pub limits: LimitArgs,

    /// Chart width in terminal columns
    #[arg(
        long,
        default_value_t = CHART_WIDTH / 2,
        value_parser = clap::value_parser!(u32).range(2..=1000)
    )]
    pub width: u32,

    /// Chart height in terminal rows
    #[arg(
        long,
        default_value_t = CHART_HEIGHT / 4,
        value_parser = clap::value_parser!(u32).range(2..=250)
    )]
    pub height: u32,
}

pub fn run(args: ChartArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let limits = args.limits.resolve(&config);
    let samples = args.input.load()?;

    match global.format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let flagged: Vec<serde_json::Value> = out_of_control(&samples, &limits)
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "index": p.index,
                        "value": p.value,
                        "breach": p.breach.to_string(),
                    })
                })
                .collect();
            let data = serde_json::json!({
                "samples": samples,
                "ucl": limits.ucl,
                "lcl": limits.lcl,
                "mean": if samples.is_empty() { None } else { Some(mean(&samples)) },
                "outOfControl": flagged,
            });
            if global.format == OutputFormat::Json {
                print_json(&data)?;
            } else {
                print_yaml(&data)?;
            }
        }
        _ => {
            // Braille cells are 2 pixels wide and 4 tall
            let width = args.width.saturating_mul(2);
            let height = args.height.saturating_mul(4);
            println!("{}", render_control_chart(&samples, &limits, width, height));
        }
    }

    Ok(())
}
