//! Terminal application state

use crossterm::event::KeyEvent;

use super::input::{InputHandler, KeyAction};
use crate::core::Notice;
use crate::widget::{Command, Tab, Widget};

/// Editable fields of the date tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateField {
    /// Start date
    #[default]
    Start,
    /// End date
    End,
    /// Day count
    Days,
}

impl DateField {
    /// Fields in display order
    pub const ALL: [Self; 3] = [Self::Start, Self::End, Self::Days];

    /// Field label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start date",
            Self::End => "End date",
            Self::Days => "Days",
        }
    }

    /// Field below, wrapping
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Days,
            Self::Days => Self::Start,
        }
    }

    /// Field above, wrapping
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Start => Self::Days,
            Self::End => Self::Start,
            Self::Days => Self::End,
        }
    }
}

/// Terminal app: a widget session plus terminal-only UI state
#[derive(Debug)]
pub struct CalculatorApp {
    widget: Widget,
    input: InputHandler,
    date_field: DateField,
    last_command: Option<Command>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new(Widget::default())
    }
}

impl CalculatorApp {
    /// Wraps a widget session
    #[must_use]
    pub fn new(widget: Widget) -> Self {
        Self {
            widget,
            input: InputHandler::new(),
            date_field: DateField::default(),
            last_command: None,
            should_quit: false,
        }
    }

    /// The widget
    #[must_use]
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// Mutable widget
    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    /// Focused date field
    #[must_use]
    pub fn date_field(&self) -> DateField {
        self.date_field
    }

    /// Most recent command, for keypad highlighting
    #[must_use]
    pub fn last_command(&self) -> Option<Command> {
        self.last_command
    }

    /// Whether the event loop should stop
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Stops the event loop
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Text of a date field
    #[must_use]
    pub fn field_text(&self, field: DateField) -> &str {
        let panel = self.widget.date_panel();
        match field {
            DateField::Start => &panel.start,
            DateField::End => &panel.end,
            DateField::Days => &panel.days,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.widget.tab() {
            Tab::Date => {
                let panel = self.widget.date_panel_mut();
                Some(match self.date_field {
                    DateField::Start => &mut panel.start,
                    DateField::End => &mut panel.end,
                    DateField::Days => &mut panel.days,
                })
            }
            _ => None,
        }
    }

    /// Handles a terminal key event at `now_ms`
    pub fn handle_key_event(&mut self, event: KeyEvent, now_ms: u64) {
        match self.input.handle_key(event, self.widget.tab()) {
            KeyAction::Key(key) => {
                if let Some(command) = Command::from_key(key) {
                    self.last_command = Some(command);
                }
                self.widget.handle_key(key, now_ms);
            }
            KeyAction::Command(command) => {
                self.dispatch(command, now_ms);
            }
            KeyAction::InsertChar(c) => self.insert_char(c),
            KeyAction::DeleteChar => self.delete_char(),
            KeyAction::FocusNext => self.date_field = self.date_field.next(),
            KeyAction::FocusPrev => self.date_field = self.date_field.prev(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Runs a widget command
    pub fn dispatch(&mut self, command: Command, now_ms: u64) -> Vec<Notice> {
        self.last_command = Some(command);
        self.widget.dispatch(command, now_ms)
    }

    /// Types into the focused panel field
    pub fn insert_char(&mut self, c: char) {
        if self.widget.tab() == Tab::Statistics {
            let mut text = self.widget.stats_input().to_string();
            text.push(c);
            self.widget.set_stats_input(text);
        } else if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    /// Deletes the last character of the focused panel field
    pub fn delete_char(&mut self) {
        if self.widget.tab() == Tab::Statistics {
            let mut text = self.widget.stats_input().to_string();
            text.pop();
            self.widget.set_stats_input(text);
        } else if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Drops expired notifications
    pub fn tick(&mut self, now_ms: u64) {
        self.widget.tick(now_ms);
    }
}
