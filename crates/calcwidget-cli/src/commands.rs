//! CLI command definitions using clap

use calcwidget::dates::DateAction;
use calcwidget::stats::StatsAction;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// calcwidget: a calculator with basic, scientific, statistics and date modes
#[derive(Parser, Debug)]
#[command(name = "calcwidget")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Widget settings file (JSON)
    #[arg(long, global = true, env = "CALCWIDGET_CONFIG")]
    pub config: Option<PathBuf>,

    /// File holding the persisted theme preference
    #[arg(long, global = true, env = "CALCWIDGET_STORE")]
    pub store: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive terminal calculator
    Tui,

    /// Feed a key sequence and print both display lines
    ///
    /// Keys use keyboard names: digits, `.`, `+ - * /`, `=`, and
    /// `{enter}`, `{escape}`, `{backspace}`.
    Keys(KeysArgs),

    /// Print statistics over comma-separated values
    Stats(StatsArgs),

    /// Run a date calculation
    Date(DateArgs),

    /// Show or toggle the persisted theme
    Theme(ThemeArgs),

    /// Print the effective configuration as JSON
    Config,
}

/// Arguments for the keys command
#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// Key sequence, e.g. "12+30{enter}"
    pub sequence: String,

    /// Button actions pressed after the keys (e.g. sqrt, memory-add)
    #[arg(short, long = "action")]
    pub actions: Vec<String>,
}

/// Statistic to report
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StatsOp {
    /// Every statistic
    #[default]
    All,
    /// Arithmetic mean
    Mean,
    /// Middle value
    Median,
    /// Most frequent values
    Mode,
    /// Population standard deviation
    StdDev,
    /// Population variance
    Variance,
}

impl StatsOp {
    /// Panel actions this op reports
    #[must_use]
    pub fn actions(self) -> Vec<StatsAction> {
        match self {
            Self::All => vec![
                StatsAction::Mean,
                StatsAction::Median,
                StatsAction::Mode,
                StatsAction::StdDev,
                StatsAction::Variance,
            ],
            Self::Mean => vec![StatsAction::Mean],
            Self::Median => vec![StatsAction::Median],
            Self::Mode => vec![StatsAction::Mode],
            Self::StdDev => vec![StatsAction::StdDev],
            Self::Variance => vec![StatsAction::Variance],
        }
    }
}

/// Arguments for the stats command
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Comma-separated values, e.g. "1, 2, 3.5"
    pub values: String,

    /// Statistic to print
    #[arg(long, value_enum, default_value = "all")]
    pub op: StatsOp,
}

/// Date calculation
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateOp {
    /// Whole days from start to end
    DaysBetween,
    /// Start plus --days
    AddDays,
    /// Start minus --days
    SubtractDays,
    /// Weekday of start
    DayOfWeek,
    /// Week number of start
    WeekNumber,
}

impl From<DateOp> for DateAction {
    fn from(op: DateOp) -> Self {
        match op {
            DateOp::DaysBetween => Self::DaysBetween,
            DateOp::AddDays => Self::AddDays,
            DateOp::SubtractDays => Self::SubtractDays,
            DateOp::DayOfWeek => Self::DayOfWeek,
            DateOp::WeekNumber => Self::WeekNumber,
        }
    }
}

/// Arguments for the date command
#[derive(Parser, Debug)]
pub struct DateArgs {
    /// Calculation to run
    #[arg(value_enum)]
    pub action: DateOp,

    /// Start date (YYYY-MM-DD or "today")
    pub start: String,

    /// End date for days-between; defaults to start
    #[arg(long)]
    pub end: Option<String>,

    /// Day count for add-days and subtract-days
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub days: String,
}

/// Arguments for the theme command
#[derive(Parser, Debug)]
pub struct ThemeArgs {
    /// Theme subcommand
    #[command(subcommand)]
    pub action: Option<ThemeAction>,
}

/// Theme subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    /// Switch between light and dark and persist the choice
    Toggle,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_keys_with_actions() {
        let cli = Cli::try_parse_from([
            "calcwidget",
            "keys",
            "81",
            "-a",
            "sqrt",
            "--action",
            "memory-add",
        ])
        .unwrap();
        let Commands::Keys(args) = cli.command else {
            panic!("expected keys");
        };
        assert_eq!(args.sequence, "81");
        assert_eq!(args.actions, vec!["sqrt", "memory-add"]);
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "calcwidget",
            "config",
            "-vv",
            "--store",
            "theme.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.store, Some(PathBuf::from("theme.json")));
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn test_parse_stats_op() {
        let cli = Cli::try_parse_from(["calcwidget", "stats", "1,2", "--op", "std-dev"]).unwrap();
        let Commands::Stats(args) = cli.command else {
            panic!("expected stats");
        };
        assert_eq!(args.op, StatsOp::StdDev);
        assert_eq!(args.op.actions(), vec![StatsAction::StdDev]);
        assert_eq!(StatsOp::All.actions().len(), 5);
    }

    #[test]
    fn test_parse_date_negative_days() {
        let cli = Cli::try_parse_from([
            "calcwidget",
            "date",
            "add-days",
            "2024-01-31",
            "--days",
            "-5",
        ])
        .unwrap();
        let Commands::Date(args) = cli.command else {
            panic!("expected date");
        };
        assert_eq!(DateAction::from(args.action), DateAction::AddDays);
        assert_eq!(args.days, "-5");
        assert_eq!(args.end, None);
    }

    #[test]
    fn test_parse_theme_toggle() {
        let cli = Cli::try_parse_from(["calcwidget", "theme", "toggle"]).unwrap();
        let Commands::Theme(args) = cli.command else {
            panic!("expected theme");
        };
        assert_eq!(args.action, Some(ThemeAction::Toggle));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["calcwidget"]).is_err());
    }
}
