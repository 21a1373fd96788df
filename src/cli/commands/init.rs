//! `spc init` command - create a project config

use std::fs;
use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::config::{Config, PROJECT_CONFIG_DIR};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Project directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let config_path = Config::project_config_path(&args.path);

    if config_path.exists() && !args.force {
        return Err(miette::miette!(
            help = "use --force to overwrite it",
            "Config already exists at {}",
            config_path.display()
        ));
    }

    fs::create_dir_all(args.path.join(PROJECT_CONFIG_DIR)).into_diagnostic()?;
    fs::write(&config_path, Config::template()).into_diagnostic()?;
    tracing::info!(path = %config_path.display(), "wrote project config");

    println!(
        "{} Initialized SPC project at {}",
        style("✓").green(),
        style(args.path.display()).cyan()
    );
    println!();
    println!("Next steps:");
    println!(
        "  1. Set default limits in {}",
        style(config_path.display()).yellow()
    );
    println!(
        "  2. Evaluate a batch:  {}",
        style("spc eval --samples \"10,12,14\"").yellow()
    );
    println!(
        "  3. Record a report:   {}",
        style("spc report --file batch.csv").yellow()
    );

    Ok(())
}
