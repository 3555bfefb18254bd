//! calcwidget CLI
//!
//! ## Usage
//!
//! ```bash
//! calcwidget tui                              # Interactive calculator
//! calcwidget keys "12+30{enter}"              # Print both display lines
//! calcwidget keys 81 --action sqrt            # Keys, then buttons
//! calcwidget stats "2, 4, 4, 5" --op median   # Statistics report
//! calcwidget date add-days 2024-02-28 --days 2
//! calcwidget theme toggle                     # Persisted light/dark
//! ```

use calcwidget_cli::handlers::{
    execute_config, execute_date, execute_keys, execute_stats, execute_theme, execute_tui,
};
use calcwidget_cli::{build_config, logging, Cli, CliConfig, CliResult, Commands};
use clap::Parser;
use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    logging::init(config.verbosity)?;
    tracing::debug!(?config, "configuration resolved");

    match cli.command {
        Commands::Tui => execute_tui(&config),
        Commands::Keys(args) => {
            let output = execute_keys(&config.widget, &args)?;
            if !output.expression.is_empty() {
                println!("{}", style(&output.expression).dim());
            }
            println!("{}", output.result);
            notify(&config, &output.notifications);
            Ok(())
        }
        Commands::Stats(args) => {
            for line in execute_stats(&args) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Date(args) => {
            println!("{}", execute_date(&args)?);
            Ok(())
        }
        Commands::Theme(args) => {
            println!("{}", execute_theme(&config, &args)?);
            Ok(())
        }
        Commands::Config => {
            println!("{}", execute_config(&config)?);
            Ok(())
        }
    }
}

fn notify(config: &CliConfig, messages: &[String]) {
    if config.verbosity.is_quiet() {
        return;
    }
    for message in messages {
        eprintln!("{} {message}", style("!").yellow().bold());
    }
}
