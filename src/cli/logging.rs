//! Tracing subscriber setup
//!
//! Logs go to stderr so report output on stdout stays pipeable. `SPC_LOG`
//! takes an `EnvFilter` directive and wins over `-v` / `-q`.

use tracing_subscriber::EnvFilter;

use crate::cli::GlobalOpts;

/// Environment variable holding a log filter directive
pub const LOG_ENV: &str = "SPC_LOG";

/// Default filter level for the given verbosity flags
pub fn default_level(global: &GlobalOpts) -> &'static str {
    if global.quiet {
        return "error";
    }
    match global.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber; a second call is a no-op
pub fn init(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(global)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
