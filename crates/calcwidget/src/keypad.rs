//! Button layouts shared by the terminal and browser front ends
//!
//! Each tab has a grid of [`ButtonDef`]s. A button is nothing more than a
//! [`Command`] with a label and a position; the front ends decide how to
//! draw it.

use crate::core::{Function, Operator};
use crate::dates::DateAction;
use crate::stats::StatsAction;
use crate::widget::{Command, MemoryAction, Tab};

/// Visual group of a button, used as a CSS class or a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonGroup {
    /// Digits and the decimal point
    Number,
    /// Operators, evaluate and the clear keys
    Operator,
    /// Memory register keys
    Memory,
    /// Scientific functions
    Scientific,
    /// Statistics panel actions
    Stats,
    /// Date panel actions
    Date,
}

impl ButtonGroup {
    /// Class name as used in markup
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Operator => "operator",
            Self::Memory => "memory",
            Self::Scientific => "scientific",
            Self::Stats => "stats",
            Self::Date => "date",
        }
    }

    fn of(command: Command) -> Self {
        match command {
            Command::Digit(_) | Command::Decimal => Self::Number,
            Command::Memory(_) => Self::Memory,
            Command::Function(_) | Command::Random | Command::ToggleAngleMode => Self::Scientific,
            Command::Stats(_) => Self::Stats,
            Command::Date(_) => Self::Date,
            _ => Self::Operator,
        }
    }
}

/// Label shown on the button for `command`
#[must_use]
pub fn label(command: Command) -> String {
    let text = match command {
        Command::Digit(d) => return d.to_string(),
        Command::Decimal => ".",
        Command::Operator(op) => op.symbol(),
        Command::Evaluate => "=",
        Command::Clear => "C",
        Command::ClearEntry => "CE",
        Command::Backspace => "⌫",
        Command::Memory(MemoryAction::Clear) => "MC",
        Command::Memory(MemoryAction::Recall) => "MR",
        Command::Memory(MemoryAction::Add) => "M+",
        Command::Memory(MemoryAction::Subtract) => "M-",
        Command::Function(f) => f.label(),
        Command::Random => "rand",
        Command::ToggleAngleMode => "DEG/RAD",
        Command::Stats(StatsAction::AddData) => "Add Data",
        Command::Stats(StatsAction::Mean) => "Mean",
        Command::Stats(StatsAction::Median) => "Median",
        Command::Stats(StatsAction::Mode) => "Mode",
        Command::Stats(StatsAction::StdDev) => "Std Dev",
        Command::Stats(StatsAction::Variance) => "Variance",
        Command::Stats(StatsAction::ClearData) => "Clear Data",
        Command::Date(DateAction::DaysBetween) => "Days Between",
        Command::Date(DateAction::AddDays) => "Add Days",
        Command::Date(DateAction::SubtractDays) => "Subtract Days",
        Command::Date(DateAction::DayOfWeek) => "Day of Week",
        Command::Date(DateAction::WeekNumber) => "Week Number",
        Command::ToggleTheme => "Theme",
        Command::SwitchTab(tab) => tab.title(),
    };
    text.to_string()
}

/// A button at a grid position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonDef {
    /// What the button does
    pub command: Command,
    /// Text on the button
    pub label: String,
    /// Visual group
    pub group: ButtonGroup,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl ButtonDef {
    /// Creates a button for `command` at `row`, `col`
    #[must_use]
    pub fn new(command: Command, row: usize, col: usize) -> Self {
        Self {
            command,
            label: label(command),
            group: ButtonGroup::of(command),
            row,
            col,
        }
    }
}

/// A grid of buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    buttons: Vec<ButtonDef>,
    rows: usize,
    cols: usize,
}

impl Keypad {
    /// Builds a keypad from rows of commands
    #[must_use]
    pub fn from_rows(rows: &[&[Command]]) -> Self {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let buttons = rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(c, command)| ButtonDef::new(*command, r, c))
            })
            .collect();
        Self {
            buttons,
            rows: rows.len(),
            cols,
        }
    }

    /// Memory row and four-function keypad
    /// ```text
    /// [MC] [MR] [M+] [M-]
    /// [ C] [CE] [ ⌫] [ ÷]
    /// [ 7] [ 8] [ 9] [ ×]
    /// [ 4] [ 5] [ 6] [ -]
    /// [ 1] [ 2] [ 3] [ +]
    /// [ 0] [ .] [ ^] [ =]
    /// ```
    #[must_use]
    pub fn basic() -> Self {
        use crate::widget::Command::{
            Backspace, Clear, ClearEntry, Decimal, Digit, Evaluate, Memory,
        };
        let op = Command::Operator;
        Self::from_rows(&[
            &[
                Memory(MemoryAction::Clear),
                Memory(MemoryAction::Recall),
                Memory(MemoryAction::Add),
                Memory(MemoryAction::Subtract),
            ],
            &[Clear, ClearEntry, Backspace, op(Operator::Divide)],
            &[Digit(7), Digit(8), Digit(9), op(Operator::Multiply)],
            &[Digit(4), Digit(5), Digit(6), op(Operator::Subtract)],
            &[Digit(1), Digit(2), Digit(3), op(Operator::Add)],
            &[Digit(0), Decimal, op(Operator::Power), Evaluate],
        ])
    }

    /// Scientific function block shown above the basic keypad
    #[must_use]
    pub fn scientific() -> Self {
        use crate::widget::Command::{Random, ToggleAngleMode};
        let f = Command::Function;
        Self::from_rows(&[
            &[
                f(Function::Sin),
                f(Function::Cos),
                f(Function::Tan),
                ToggleAngleMode,
                Random,
            ],
            &[
                f(Function::Sinh),
                f(Function::Cosh),
                f(Function::Tanh),
                f(Function::Pi),
                f(Function::E),
            ],
            &[
                f(Function::Ln),
                f(Function::Log10),
                f(Function::Exp),
                f(Function::Sqrt),
                f(Function::Factorial),
            ],
            &[
                f(Function::Abs),
                f(Function::Floor),
                f(Function::Ceil),
                f(Function::Round),
                Command::Operator(Operator::Power),
            ],
        ])
    }

    /// Statistics panel buttons
    #[must_use]
    pub fn statistics() -> Self {
        let s = Command::Stats;
        Self::from_rows(&[
            &[
                s(StatsAction::AddData),
                s(StatsAction::Mean),
                s(StatsAction::Median),
                s(StatsAction::Mode),
            ],
            &[
                s(StatsAction::StdDev),
                s(StatsAction::Variance),
                s(StatsAction::ClearData),
            ],
        ])
    }

    /// Date panel buttons
    #[must_use]
    pub fn date() -> Self {
        let d = Command::Date;
        Self::from_rows(&[
            &[
                d(DateAction::DaysBetween),
                d(DateAction::AddDays),
                d(DateAction::SubtractDays),
            ],
            &[d(DateAction::DayOfWeek), d(DateAction::WeekNumber)],
        ])
    }

    /// The keypads shown on `tab`, top to bottom
    #[must_use]
    pub fn for_tab(tab: Tab) -> Vec<Self> {
        match tab {
            Tab::Basic => vec![Self::basic()],
            Tab::Scientific => vec![Self::scientific(), Self::basic()],
            Tab::Statistics => vec![Self::statistics()],
            Tab::Date => vec![Self::date()],
        }
    }

    /// All buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[ButtonDef] {
        &self.buttons
    }

    /// Number of buttons
    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// True for a keypad without buttons
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Button at a grid position; short rows leave gaps
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&ButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Button that issues `command`
    #[must_use]
    pub fn find(&self, command: Command) -> Option<&ButtonDef> {
        self.buttons.iter().find(|b| b.command == command)
    }
}
