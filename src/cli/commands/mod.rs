//! CLI command implementations

pub mod chart;
pub mod completions;
pub mod eval;
pub mod export;
pub mod init;
pub mod report;
