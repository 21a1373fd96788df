//! `spc completions` command - shell completion scripts

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate for (default: detected from $SHELL, else bash)
    #[arg(value_enum)]
    pub shell: Option<Shell>,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let shell = args
        .shell
        .unwrap_or_else(|| Shell::from_env().unwrap_or(Shell::Bash));

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
    Ok(())
}
