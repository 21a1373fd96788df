//! SPC Report: statistical process control from the command line
//!
//! Evaluates batches of sample measurements against specification and
//! control limits, and rolls each batch up into weekly, monthly and yearly
//! report sheets.

pub mod cli;
pub mod core;
pub mod entities;
pub mod input;
