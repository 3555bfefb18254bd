//! One-shot calculations: keys, stats and date

use calcwidget::config::WidgetConfig;
use calcwidget::dates::{format_iso, DateAction, DateCalculator};
use calcwidget::stats::DataSet;
use calcwidget::theme::MemoryStore;
use calcwidget::widget::{Command, Key, Tab, Widget};
use chrono::Local;
use tracing::debug;

use crate::commands::{DateArgs, KeysArgs, StatsArgs};
use crate::error::{CliError, CliResult};

/// Display lines and raised notifications after a key sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysOutput {
    /// Expression line
    pub expression: String,
    /// Result line
    pub result: String,
    /// Notifications still visible at the end
    pub notifications: Vec<String>,
}

/// Feeds `args.sequence` then each action into a fresh widget
pub fn execute_keys(config: &WidgetConfig, args: &KeysArgs) -> CliResult<KeysOutput> {
    let commands = args
        .actions
        .iter()
        .map(|action| {
            Command::from_action(action)
                .ok_or_else(|| CliError::invalid_argument(format!("unknown action '{action}'")))
        })
        .collect::<CliResult<Vec<_>>>()?;

    let mut widget = Widget::new(config.clone(), Box::new(MemoryStore::new()));
    if !widget.tab().accepts_keyboard() {
        widget.dispatch(Command::SwitchTab(Tab::Basic), 0);
    }
    for key in Key::parse_sequence(&args.sequence) {
        widget.handle_key(key, 0);
    }
    for command in commands {
        debug!(action = %command.action(), "action");
        widget.dispatch(command, 0);
    }

    let display = widget.display();
    Ok(KeysOutput {
        expression: display.expression,
        result: display.result,
        notifications: widget.notifications(0),
    })
}

/// Report lines for the requested statistics
#[must_use]
pub fn execute_stats(args: &StatsArgs) -> Vec<String> {
    let mut data = DataSet::new();
    data.add_input(&args.values);
    debug!(count = data.len(), "values parsed");
    args.op
        .actions()
        .into_iter()
        .filter_map(|action| data.apply(action, ""))
        .collect()
}

/// Results line of a date calculation
pub fn execute_date(args: &DateArgs) -> CliResult<String> {
    let start = resolve_date(&args.start);
    let panel = DateCalculator {
        end: args.end.as_deref().map_or_else(|| start.clone(), resolve_date),
        start,
        days: args.days.clone(),
    };
    Ok(panel.try_run(DateAction::from(args.action))?)
}

fn resolve_date(text: &str) -> String {
    if text.trim().eq_ignore_ascii_case("today") {
        format_iso(Local::now().date_naive())
    } else {
        text.to_string()
    }
}
