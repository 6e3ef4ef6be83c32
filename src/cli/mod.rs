//! CLI module - argument parsing and subcommand runners

mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::{run_epoch, run_lookup, run_prepare, run_transform, PrepareOptions};
