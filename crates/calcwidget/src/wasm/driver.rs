//! Browser driver: runs the shared scenarios against the DOM-bound widget

use super::calculator::WasmCalculator;
use super::dom::{ids, DomEvent};
use crate::driver::CalculatorDriver;
use crate::widget::{Command, Key, Tab};

/// Drives a [`WasmCalculator`] through DOM events only
#[derive(Debug, Default)]
pub struct WasmDriver {
    calculator: WasmCalculator,
    now_ms: u64,
}

impl WasmDriver {
    /// Creates a driver over a default widget
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver over an existing calculator
    #[must_use]
    pub fn with_calculator(calculator: WasmCalculator) -> Self {
        Self {
            calculator,
            now_ms: 0,
        }
    }

    /// The calculator
    #[must_use]
    pub fn calculator(&self) -> &WasmCalculator {
        &self.calculator
    }

    /// Moves the driver clock forward
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        self.calculator.tick(self.now_ms);
    }

    /// Types into a form field
    pub fn fill(&mut self, element_id: &str, value: &str) {
        self.calculator
            .handle_event(DomEvent::input(element_id, value), self.now_ms);
    }

    /// Text of the notification elements
    #[must_use]
    pub fn notification_elements(&self) -> Vec<String> {
        self.calculator.dom().child_texts(ids::NOTIFICATIONS)
    }
}

fn dom_key(key: Key) -> String {
    match key {
        Key::Char(c) => c.to_string(),
        Key::Enter => "Enter".into(),
        Key::Escape => "Escape".into(),
        Key::Backspace => "Backspace".into(),
    }
}

impl CalculatorDriver for WasmDriver {
    fn press(&mut self, keys: &str) {
        for key in Key::parse_sequence(keys) {
            self.calculator
                .handle_event(DomEvent::key_down(&dom_key(key)), self.now_ms);
        }
    }

    fn click(&mut self, action: &str) -> bool {
        let element_id = match Command::from_action(action) {
            Some(Command::SwitchTab(tab)) => format!("tab-{}", tab.name()),
            Some(Command::ToggleTheme) => ids::THEME_SWITCH.to_string(),
            Some(command) => super::keypad::button_id(command),
            None => return false,
        };
        if self.calculator.dom().get_element(&element_id).is_none() {
            return false;
        }
        self.calculator
            .handle_event(DomEvent::click(&element_id), self.now_ms);
        true
    }

    fn expression_line(&self) -> String {
        self.calculator.text(ids::CALCULATION).to_string()
    }

    fn result_line(&self) -> String {
        self.calculator.text(ids::RESULT).to_string()
    }

    fn notifications(&self) -> Vec<String> {
        self.notification_elements()
    }

    fn clear(&mut self) {
        let tab = self.calculator.widget().tab();
        if !tab.accepts_keyboard() {
            self.click(&Command::SwitchTab(Tab::Basic).action());
        }
        self.click(&Command::Clear.action());
    }
}
