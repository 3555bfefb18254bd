//! calcwidget CLI library
//!
//! Argument parsing, configuration, logging and the command handlers behind
//! the `calcwidget` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;

pub use commands::{
    Cli, Commands, DateArgs, DateOp, KeysArgs, StatsArgs, StatsOp, ThemeAction, ThemeArgs,
};
pub use config::{CliConfig, Verbosity, DEFAULT_STORE_FILE};
pub use error::{CliError, CliResult};

/// Effective configuration for parsed arguments
pub fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config =
        CliConfig::new().with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));
    if let Some(path) = &cli.config {
        config = config.with_widget_file(path)?;
    }
    if let Some(path) = &cli.store {
        config = config.with_store_path(path);
    }
    Ok(config)
}
