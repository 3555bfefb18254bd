//! Keyboard mapping for the terminal front end
//!
//! The calculator tabs forward plain keys to the widget and add hotkeys for
//! buttons that have no key of their own. The panel tabs edit their text
//! fields and run actions from the function keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{Function, Operator};
use crate::dates::DateAction;
use crate::stats::StatsAction;
use crate::widget::{Command, Key, MemoryAction, Tab};

/// What a key press does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward a calculator key to the widget
    Key(Key),
    /// Run a widget command
    Command(Command),
    /// Type into the focused panel field
    InsertChar(char),
    /// Delete the last character of the focused panel field
    DeleteChar,
    /// Focus the next date field
    FocusNext,
    /// Focus the previous date field
    FocusPrev,
    /// Leave the application
    Quit,
    /// Ignored
    None,
}

/// Maps key events to actions for the active tab
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event on `tab`
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent, tab: Tab) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('t') => KeyAction::Command(Command::ToggleTheme),
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Tab => return KeyAction::Command(Command::SwitchTab(tab.next())),
            KeyCode::F(12) => return KeyAction::Command(Command::ToggleTheme),
            _ => {}
        }

        match tab {
            Tab::Basic | Tab::Scientific => Self::calculator_key(code, tab),
            Tab::Statistics => Self::statistics_key(code),
            Tab::Date => Self::date_key(code),
        }
    }

    fn calculator_key(code: KeyCode, tab: Tab) -> KeyAction {
        match code {
            KeyCode::Char('^') => KeyAction::Command(Command::Operator(Operator::Power)),
            KeyCode::Char(c) if tab == Tab::Scientific => {
                Self::scientific_hotkey(c).map_or(KeyAction::Key(Key::Char(c)), KeyAction::Command)
            }
            KeyCode::Char(c) => KeyAction::Key(Key::Char(c)),
            KeyCode::Enter => KeyAction::Key(Key::Enter),
            KeyCode::Esc => KeyAction::Key(Key::Escape),
            KeyCode::Backspace => KeyAction::Key(Key::Backspace),
            KeyCode::Delete => KeyAction::Command(Command::ClearEntry),
            KeyCode::F(n @ 2..=5) => {
                KeyAction::Command(Command::Memory(MemoryAction::ALL[usize::from(n) - 2]))
            }
            _ => KeyAction::None,
        }
    }

    /// Letter hotkeys of the scientific tab
    #[must_use]
    pub fn scientific_hotkey(c: char) -> Option<Command> {
        let function = match c {
            's' => Function::Sin,
            'c' => Function::Cos,
            't' => Function::Tan,
            'S' => Function::Sinh,
            'C' => Function::Cosh,
            'T' => Function::Tanh,
            'l' => Function::Ln,
            'L' => Function::Log10,
            'E' => Function::Exp,
            'r' => Function::Sqrt,
            'a' => Function::Abs,
            'f' => Function::Floor,
            'F' => Function::Ceil,
            'o' => Function::Round,
            '!' => Function::Factorial,
            'p' => Function::Pi,
            'e' => Function::E,
            '?' => return Some(Command::Random),
            'd' => return Some(Command::ToggleAngleMode),
            _ => return None,
        };
        Some(Command::Function(function))
    }

    fn statistics_key(code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char(c) => KeyAction::InsertChar(c),
            KeyCode::Backspace => KeyAction::DeleteChar,
            KeyCode::Enter => KeyAction::Command(Command::Stats(StatsAction::AddData)),
            KeyCode::F(n @ 1..=6) => {
                KeyAction::Command(Command::Stats(StatsAction::ALL[usize::from(n)]))
            }
            _ => KeyAction::None,
        }
    }

    fn date_key(code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char(c) => KeyAction::InsertChar(c),
            KeyCode::Backspace => KeyAction::DeleteChar,
            KeyCode::Up => KeyAction::FocusPrev,
            KeyCode::Down => KeyAction::FocusNext,
            KeyCode::Enter => KeyAction::Command(Command::Date(DateAction::DaysBetween)),
            KeyCode::F(n @ 1..=5) => {
                KeyAction::Command(Command::Date(DateAction::ALL[usize::from(n) - 1]))
            }
            _ => KeyAction::None,
        }
    }
}

/// Key help for `tab`, as (key, description) pairs
#[must_use]
pub fn help(tab: Tab) -> &'static [(&'static str, &'static str)] {
    match tab {
        Tab::Basic => &[
            ("0-9 .", "Enter digits"),
            ("+-*/^", "Operators"),
            ("Enter", "Evaluate"),
            ("Esc", "Clear"),
            ("Del", "Clear entry"),
            ("F2-F5", "MC MR M+ M-"),
        ],
        Tab::Scientific => &[
            ("s c t", "sin cos tan"),
            ("S C T", "sinh cosh tanh"),
            ("l L E", "ln log eˣ"),
            ("r a !", "√ |x| n!"),
            ("f F o", "floor ceil round"),
            ("p e ?", "π e rand"),
            ("d", "DEG/RAD"),
        ],
        Tab::Statistics => &[
            ("Enter", "Add data"),
            ("F1 F2 F3", "Mean Median Mode"),
            ("F4 F5", "Std dev Variance"),
            ("F6", "Clear data"),
        ],
        Tab::Date => &[
            ("↑/↓", "Select field"),
            ("Enter F1", "Days between"),
            ("F2 F3", "Add/Sub days"),
            ("F4 F5", "Weekday Week no."),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    mod global_tests {
        use super::*;

        #[test]
        fn test_quit_on_every_tab() {
            let handler = InputHandler::new();
            for tab in Tab::ALL {
                assert_eq!(handler.handle_key(ctrl('c'), tab), KeyAction::Quit);
                assert_eq!(handler.handle_key(ctrl('q'), tab), KeyAction::Quit);
            }
        }

        #[test]
        fn test_tab_cycles() {
            let handler = InputHandler::new();
            assert_eq!(
                handler.handle_key(key(KeyCode::Tab), Tab::Date),
                KeyAction::Command(Command::SwitchTab(Tab::Basic))
            );
        }

        #[test]
        fn test_theme_keys() {
            let handler = InputHandler::new();
            let toggle = KeyAction::Command(Command::ToggleTheme);
            assert_eq!(handler.handle_key(key(KeyCode::F(12)), Tab::Statistics), toggle);
            assert_eq!(handler.handle_key(ctrl('t'), Tab::Basic), toggle);
            assert_eq!(handler.handle_key(ctrl('z'), Tab::Basic), KeyAction::None);
        }
    }

    mod calculator_tests {
        use super::*;

        #[test]
        fn test_plain_keys_forwarded() {
            let handler = InputHandler::new();
            for c in ['0', '9', '.', '+', '-', '*', '/', '=', 'x'] {
                assert_eq!(
                    handler.handle_key(key(KeyCode::Char(c)), Tab::Basic),
                    KeyAction::Key(Key::Char(c))
                );
            }
            assert_eq!(
                handler.handle_key(key(KeyCode::Enter), Tab::Basic),
                KeyAction::Key(Key::Enter)
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::Esc), Tab::Scientific),
                KeyAction::Key(Key::Escape)
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::Backspace), Tab::Basic),
                KeyAction::Key(Key::Backspace)
            );
        }

        #[test]
        fn test_power_and_clear_entry() {
            let handler = InputHandler::new();
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('^')), Tab::Basic),
                KeyAction::Command(Command::Operator(Operator::Power))
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::Delete), Tab::Basic),
                KeyAction::Command(Command::ClearEntry)
            );
        }

        #[test]
        fn test_memory_function_keys() {
            let handler = InputHandler::new();
            assert_eq!(
                handler.handle_key(key(KeyCode::F(2)), Tab::Basic),
                KeyAction::Command(Command::Memory(MemoryAction::Clear))
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::F(5)), Tab::Scientific),
                KeyAction::Command(Command::Memory(MemoryAction::Subtract))
            );
            assert_eq!(handler.handle_key(key(KeyCode::F(6)), Tab::Basic), KeyAction::None);
        }

        #[test]
        fn test_scientific_hotkeys_only_on_scientific_tab() {
            let handler = InputHandler::new();
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('s')), Tab::Scientific),
                KeyAction::Command(Command::Function(Function::Sin))
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('s')), Tab::Basic),
                KeyAction::Key(Key::Char('s'))
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('7')), Tab::Scientific),
                KeyAction::Key(Key::Char('7'))
            );
        }

        #[test]
        fn test_every_function_has_a_hotkey() {
            let bound: Vec<Command> = ('!'..='~')
                .filter_map(InputHandler::scientific_hotkey)
                .collect();
            for f in Function::ALL {
                assert!(bound.contains(&Command::Function(f)), "{f:?}");
            }
            assert!(bound.contains(&Command::Random));
            assert!(bound.contains(&Command::ToggleAngleMode));
        }
    }

    mod panel_tests {
        use super::*;

        #[test]
        fn test_statistics_keys() {
            let handler = InputHandler::new();
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('3')), Tab::Statistics),
                KeyAction::InsertChar('3')
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::Backspace), Tab::Statistics),
                KeyAction::DeleteChar
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::Enter), Tab::Statistics),
                KeyAction::Command(Command::Stats(StatsAction::AddData))
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::F(1)), Tab::Statistics),
                KeyAction::Command(Command::Stats(StatsAction::Mean))
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::F(6)), Tab::Statistics),
                KeyAction::Command(Command::Stats(StatsAction::ClearData))
            );
        }

        #[test]
        fn test_date_keys() {
            let handler = InputHandler::new();
            assert_eq!(
                handler.handle_key(key(KeyCode::Down), Tab::Date),
                KeyAction::FocusNext
            );
            assert_eq!(handler.handle_key(key(KeyCode::Up), Tab::Date), KeyAction::FocusPrev);
            assert_eq!(
                handler.handle_key(key(KeyCode::F(5)), Tab::Date),
                KeyAction::Command(Command::Date(DateAction::WeekNumber))
            );
            assert_eq!(
                handler.handle_key(key(KeyCode::Char('-')), Tab::Date),
                KeyAction::InsertChar('-')
            );
        }

        #[test]
        fn test_help_for_every_tab() {
            for tab in Tab::ALL {
                assert!(!help(tab).is_empty());
            }
        }
    }
}
