//! Widget session: tabs, command dispatch and keyboard mapping
//!
//! [`Widget`] owns every piece of session state (calculator machine, memory
//! register, data set, date panel, notifications, theme) and routes
//! [`Command`]s to the right collaborator. Front ends only translate their
//! events into commands and read the display accessors back.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::WidgetConfig;
use crate::core::{CalculatorState, Effect, Function, Input, MemoryRegister, Notice, Operator};
use crate::dates::{DateAction, DateCalculator};
use crate::notify::Notifier;
use crate::stats::{DataSet, StatsAction};
use crate::theme::{KeyValueStore, MemoryStore, Theme, ThemePreference};

/// Widget tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Four-function keypad
    #[default]
    Basic,
    /// Keypad plus scientific functions
    Scientific,
    /// Data set and descriptive statistics
    Statistics,
    /// Date arithmetic
    Date,
}

impl Tab {
    /// All tabs in display order
    pub const ALL: [Self; 4] = [Self::Basic, Self::Scientific, Self::Statistics, Self::Date];

    /// Tab name as used in `data-tab` attributes
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Scientific => "scientific",
            Self::Statistics => "statistics",
            Self::Date => "date",
        }
    }

    /// Title for tab bars
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Scientific => "Scientific",
            Self::Statistics => "Statistics",
            Self::Date => "Date",
        }
    }

    /// Looks a tab up by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// True for tabs that drive the calculator keypad
    #[must_use]
    pub const fn accepts_keyboard(self) -> bool {
        matches!(self, Self::Basic | Self::Scientific)
    }

    /// The tab after this one, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Basic => Self::Scientific,
            Self::Scientific => Self::Statistics,
            Self::Statistics => Self::Date,
            Self::Date => Self::Basic,
        }
    }
}

/// Memory register operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryAction {
    /// MC
    Clear,
    /// MR
    Recall,
    /// M+
    Add,
    /// M-
    Subtract,
}

impl MemoryAction {
    /// All memory actions in keypad order
    pub const ALL: [Self; 4] = [Self::Clear, Self::Recall, Self::Add, Self::Subtract];

    /// Action name used by keypad buttons
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::Clear => "memory-clear",
            Self::Recall => "memory-recall",
            Self::Add => "memory-add",
            Self::Subtract => "memory-subtract",
        }
    }
}

/// Every control the widget offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Binary operator
    Operator(Operator),
    /// `=`
    Evaluate,
    /// Clear everything
    Clear,
    /// Clear the current entry
    ClearEntry,
    /// Delete the last character
    Backspace,
    /// Memory register operation
    Memory(MemoryAction),
    /// Scientific function
    Function(Function),
    /// Uniform random value in `[0, 1)`
    Random,
    /// Degrees/radians switch
    ToggleAngleMode,
    /// Statistics panel action
    Stats(StatsAction),
    /// Date panel action
    Date(DateAction),
    /// Light/dark switch
    ToggleTheme,
    /// Show another tab
    SwitchTab(Tab),
}

impl Command {
    /// Parses a button action name or digit value
    ///
    /// `power` is the binary operator. `log` is the natural logarithm.
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        let action = action.trim();
        if let [d @ b'0'..=b'9'] = action.as_bytes() {
            return Some(Self::Digit(d - b'0'));
        }
        let command = match action {
            "decimal" => Self::Decimal,
            "calculate" => Self::Evaluate,
            "clear" => Self::Clear,
            "clear-entry" => Self::ClearEntry,
            "backspace" => Self::Backspace,
            "rand" => Self::Random,
            "deg-rad" => Self::ToggleAngleMode,
            "theme" => Self::ToggleTheme,
            other => {
                if let Some(op) = Operator::from_action(other) {
                    Self::Operator(op)
                } else if let Some(m) = MemoryAction::ALL.into_iter().find(|m| m.action() == other)
                {
                    Self::Memory(m)
                } else if let Some(f) = Function::from_action(other) {
                    Self::Function(f)
                } else if let Some(s) = StatsAction::from_action(other) {
                    Self::Stats(s)
                } else if let Some(d) = DateAction::from_action(other) {
                    Self::Date(d)
                } else {
                    return Tab::from_name(other.strip_prefix("tab-")?).map(Self::SwitchTab);
                }
            }
        };
        Some(command)
    }

    /// Canonical action name
    #[must_use]
    pub fn action(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => "decimal".into(),
            Self::Operator(op) => op.action().into(),
            Self::Evaluate => "calculate".into(),
            Self::Clear => "clear".into(),
            Self::ClearEntry => "clear-entry".into(),
            Self::Backspace => "backspace".into(),
            Self::Memory(m) => m.action().into(),
            Self::Function(f) => f.action().into(),
            Self::Random => "rand".into(),
            Self::ToggleAngleMode => "deg-rad".into(),
            Self::Stats(s) => s.action().into(),
            Self::Date(d) => d.action().into(),
            Self::ToggleTheme => "theme".into(),
            Self::SwitchTab(t) => format!("tab-{}", t.name()),
        }
    }

    /// Maps a keyboard key to a command
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char(c @ '0'..='9') => Some(Self::Digit(c as u8 - b'0')),
            Key::Char('.') => Some(Self::Decimal),
            Key::Char('+') => Some(Self::Operator(Operator::Add)),
            Key::Char('-') => Some(Self::Operator(Operator::Subtract)),
            Key::Char('*' | 'x') => Some(Self::Operator(Operator::Multiply)),
            Key::Char('/') => Some(Self::Operator(Operator::Divide)),
            Key::Char('=') | Key::Enter => Some(Self::Evaluate),
            Key::Escape => Some(Self::Clear),
            Key::Backspace => Some(Self::Backspace),
            Key::Char(_) => None,
        }
    }

    /// The state-machine input this command maps to, if it is a pure one
    const fn machine_input(self) -> Option<Input> {
        match self {
            Self::Digit(d) => Some(Input::Digit(d)),
            Self::Decimal => Some(Input::DecimalPoint),
            Self::Operator(op) => Some(Input::Operator(op)),
            Self::Evaluate => Some(Input::Evaluate),
            Self::Clear => Some(Input::ClearAll),
            Self::ClearEntry => Some(Input::ClearEntry),
            Self::Backspace => Some(Input::Backspace),
            Self::Function(f) => Some(Input::Apply(f)),
            Self::ToggleAngleMode => Some(Input::ToggleAngleMode),
            _ => None,
        }
    }
}

/// Keyboard keys the widget understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character
    Char(char),
    /// Enter / Return
    Enter,
    /// Escape
    Escape,
    /// Backspace
    Backspace,
}

impl Key {
    /// Parses a key sequence such as `"12+3{enter}"`
    ///
    /// Braced names (`{enter}`, `{esc}`, `{bs}`) stand for the special keys;
    /// every other character is itself.
    #[must_use]
    pub fn parse_sequence(sequence: &str) -> Vec<Self> {
        let mut keys = Vec::new();
        let mut rest = sequence;
        while let Some(ch) = rest.chars().next() {
            if ch == '{' {
                if let Some(end) = rest.find('}') {
                    let special = match rest[1..end].to_ascii_lowercase().as_str() {
                        "enter" => Some(Self::Enter),
                        "esc" | "escape" => Some(Self::Escape),
                        "bs" | "backspace" => Some(Self::Backspace),
                        _ => None,
                    };
                    if let Some(key) = special {
                        keys.push(key);
                        rest = &rest[end + 1..];
                        continue;
                    }
                }
            }
            keys.push(match ch {
                '\n' | '\r' => Self::Enter,
                other => Self::Char(other),
            });
            rest = &rest[ch.len_utf8()..];
        }
        keys
    }
}

/// The two calculator display lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayLines {
    /// Pending expression, e.g. `"12 +"`
    pub expression: String,
    /// Formatted current operand
    pub result: String,
}

/// A calculator widget session
#[derive(Debug)]
pub struct Widget {
    config: WidgetConfig,
    state: CalculatorState,
    memory: MemoryRegister,
    data: DataSet,
    stats_input: String,
    stats_results: String,
    dates: DateCalculator,
    date_results: String,
    notifier: Notifier,
    theme: ThemePreference,
    tab: Tab,
    rng: StdRng,
}

impl Default for Widget {
    fn default() -> Self {
        Self::new(WidgetConfig::default(), Box::new(MemoryStore::new()))
    }
}

impl Widget {
    /// Creates a session; the theme is read from `store` once
    #[must_use]
    pub fn new(config: WidgetConfig, store: Box<dyn KeyValueStore>) -> Self {
        let rng = config
            .rng_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            state: CalculatorState::with_angle_mode(config.angle_mode),
            memory: MemoryRegister::new(),
            data: DataSet::new(),
            stats_input: String::new(),
            stats_results: String::new(),
            dates: DateCalculator::default(),
            date_results: String::new(),
            notifier: Notifier::new(config.notification_ttl_ms),
            theme: ThemePreference::load(store, config.theme_key.clone()),
            tab: config.default_tab,
            rng,
            config,
        }
    }

    /// Session configuration
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Calculator state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Memory register
    #[must_use]
    pub fn memory(&self) -> &MemoryRegister {
        &self.memory
    }

    /// Data set of the statistics tab
    #[must_use]
    pub fn data(&self) -> &DataSet {
        &self.data
    }

    /// Active tab
    #[must_use]
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Current theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Statistics input field
    #[must_use]
    pub fn stats_input(&self) -> &str {
        &self.stats_input
    }

    /// Replaces the statistics input field
    pub fn set_stats_input(&mut self, text: impl Into<String>) {
        self.stats_input = text.into();
    }

    /// Date panel fields
    #[must_use]
    pub fn date_panel(&self) -> &DateCalculator {
        &self.dates
    }

    /// Mutable date panel fields
    pub fn date_panel_mut(&mut self) -> &mut DateCalculator {
        &mut self.dates
    }

    /// Both calculator display lines
    #[must_use]
    pub fn display(&self) -> DisplayLines {
        DisplayLines {
            expression: self.state.expression_line(),
            result: self.state.result_line(),
        }
    }

    /// Statistics results line
    #[must_use]
    pub fn stats_results(&self) -> &str {
        &self.stats_results
    }

    /// Data-values line
    #[must_use]
    pub fn data_values(&self) -> String {
        self.data.values_line()
    }

    /// Date results line
    #[must_use]
    pub fn date_results(&self) -> &str {
        &self.date_results
    }

    /// Notification texts visible at `now_ms`
    #[must_use]
    pub fn notifications(&self, now_ms: u64) -> Vec<String> {
        self.notifier.messages(now_ms)
    }

    /// Notification queue
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Drops expired notifications
    pub fn tick(&mut self, now_ms: u64) -> usize {
        self.notifier.prune(now_ms)
    }

    /// Handles a keyboard key; returns false when the key was ignored
    ///
    /// Keys only reach the calculator on the basic and scientific tabs.
    pub fn handle_key(&mut self, key: Key, now_ms: u64) -> bool {
        if !self.tab.accepts_keyboard() {
            return false;
        }
        match Command::from_key(key) {
            Some(command) => {
                self.dispatch(command, now_ms);
                true
            }
            None => false,
        }
    }

    /// Runs a command and returns the notices it raised
    pub fn dispatch(&mut self, command: Command, now_ms: u64) -> Vec<Notice> {
        debug!(action = %command.action(), tab = self.tab.name(), "dispatch");

        if let Some(input) = command.machine_input() {
            return self.run_input(input, now_ms);
        }

        match command {
            Command::Memory(action) => self.memory_action(action, now_ms),
            Command::Random => {
                let sample: f64 = self.rng.gen();
                self.run_input(Input::Random(sample), now_ms)
            }
            Command::Stats(action) => {
                if let Some(line) = self.data.apply(action, &self.stats_input) {
                    self.stats_results = line;
                }
                if action == StatsAction::AddData {
                    self.stats_input.clear();
                }
                Vec::new()
            }
            Command::Date(action) => {
                self.date_results = self.dates.run(action);
                Vec::new()
            }
            Command::ToggleTheme => {
                if let Err(err) = self.theme.toggle() {
                    warn!(%err, "theme preference not saved");
                }
                Vec::new()
            }
            Command::SwitchTab(tab) => {
                self.tab = tab;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn memory_action(&mut self, action: MemoryAction, now_ms: u64) -> Vec<Notice> {
        let notice = match action {
            MemoryAction::Clear => {
                self.memory.clear();
                Notice::MemoryCleared
            }
            MemoryAction::Recall => {
                let refused = self.run_input(Input::Load(self.memory.value()), now_ms);
                if !refused.is_empty() {
                    return refused;
                }
                Notice::MemoryRecalled
            }
            MemoryAction::Add => {
                self.memory.add(self.state.current());
                Notice::MemoryAdded
            }
            MemoryAction::Subtract => {
                self.memory.subtract(self.state.current());
                Notice::MemorySubtracted
            }
        };
        self.notifier.notify(notice, now_ms);
        vec![notice]
    }

    fn run_input(&mut self, input: Input, now_ms: u64) -> Vec<Notice> {
        let effects = self.state.apply_input(input);
        effects
            .into_iter()
            .map(|Effect::Notify(notice)| {
                if notice.is_warning() {
                    warn!(?input, %notice, "operation refused");
                }
                self.notifier.notify(notice, now_ms);
                notice
            })
            .collect()
    }
}
