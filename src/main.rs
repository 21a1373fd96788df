use clap::Parser;
use miette::Result;
use spc::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    spc::cli::logging::init(&cli.global);

    let global = &cli.global;
    match cli.command {
        Commands::Init(args) => spc::cli::commands::init::run(args),
        Commands::Eval(args) => spc::cli::commands::eval::run(args, global),
        Commands::Report(args) => spc::cli::commands::report::run(args, global),
        Commands::Export(args) => spc::cli::commands::export::run(args),
        Commands::Chart(args) => spc::cli::commands::chart::run(args, global),
        Commands::Completions(args) => spc::cli::commands::completions::run(args),
    }
}
