//! Browser keypad: DOM buttons for the shared layouts
//!
//! Every button gets the id `btn-<action>` and a `data-action` attribute
//! holding the command's action name, so a click handler only needs the
//! element id to find the command again.

use super::dom::DomElement;
use crate::keypad::{ButtonDef, Keypad};
use crate::widget::{Command, Key, Tab};

/// Element id of the button for `command`
#[must_use]
pub fn button_id(command: Command) -> String {
    format!("btn-{}", command.action())
}

/// DOM element for one button
#[must_use]
pub fn button_element(button: &ButtonDef) -> DomElement {
    let mut elem = DomElement::new("button")
        .with_id(&button_id(button.command))
        .with_text(&button.label)
        .with_class("btn")
        .with_class(button.group.class())
        .with_attr("data-action", &button.command.action());
    if let Command::Digit(d) = button.command {
        elem = elem.with_attr("data-value", &d.to_string());
    }
    elem
}

/// All keypads of the widget, by tab
#[derive(Debug, Clone)]
pub struct WasmKeypad {
    pads: Vec<(Tab, Vec<Keypad>)>,
}

impl Default for WasmKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmKeypad {
    /// Builds the keypads of every tab
    #[must_use]
    pub fn new() -> Self {
        Self {
            pads: Tab::ALL.into_iter().map(|t| (t, Keypad::for_tab(t))).collect(),
        }
    }

    /// Keypads shown on `tab`
    #[must_use]
    pub fn for_tab(&self, tab: Tab) -> &[Keypad] {
        self.pads
            .iter()
            .find(|(t, _)| *t == tab)
            .map_or(&[], |(_, pads)| pads.as_slice())
    }

    /// Number of distinct buttons across all tabs
    #[must_use]
    pub fn button_count(&self) -> usize {
        let mut ids: Vec<String> = self.buttons().map(|b| button_id(b.command)).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    fn buttons(&self) -> impl Iterator<Item = &ButtonDef> {
        self.pads
            .iter()
            .flat_map(|(_, pads)| pads.iter().flat_map(Keypad::buttons))
    }

    /// Container element for `tab`'s keypads
    #[must_use]
    pub fn create_keypad_element(&self, tab: Tab) -> DomElement {
        self.for_tab(tab)
            .iter()
            .flat_map(Keypad::buttons)
            .fold(
                DomElement::new("div")
                    .with_id(&format!("{}-keypad", tab.name()))
                    .with_class("keypad"),
                |pad, b| pad.with_child(button_element(b)),
            )
    }

    /// Command behind a clicked element
    ///
    /// Keypad buttons resolve through their id; tab buttons (`tab-<name>`)
    /// and the theme switch are recognized too.
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<Command> {
        if element_id == super::dom::ids::THEME_SWITCH {
            return Some(Command::ToggleTheme);
        }
        if let Some(tab) = element_id.strip_prefix("tab-").and_then(Tab::from_name) {
            return Some(Command::SwitchTab(tab));
        }
        let action = element_id.strip_prefix("btn-")?;
        self.buttons()
            .find(|b| b.command.action() == action)
            .map(|b| b.command)
    }

    /// Maps a `KeyboardEvent.key` value to a widget key
    #[must_use]
    pub fn key_from_dom(key: &str) -> Option<Key> {
        match key {
            "Enter" => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            "Backspace" => Some(Key::Backspace),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(Key::Char(ch)),
                    _ => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Function, Operator};
    use crate::dates::DateAction;
    use crate::stats::StatsAction;
    use crate::widget::MemoryAction;

    #[test]
    fn test_button_ids() {
        assert_eq!(button_id(Command::Digit(7)), "btn-7");
        assert_eq!(button_id(Command::Operator(Operator::Add)), "btn-add");
        assert_eq!(button_id(Command::Evaluate), "btn-calculate");
        assert_eq!(button_id(Command::Memory(MemoryAction::Add)), "btn-memory-add");
        assert_eq!(button_id(Command::Stats(StatsAction::StdDev)), "btn-std-dev");
    }

    #[test]
    fn test_button_element() {
        let keypad = Keypad::basic();
        let seven = keypad.find(Command::Digit(7)).unwrap();
        let elem = button_element(seven);
        assert_eq!(elem.id, "btn-7");
        assert_eq!(elem.text_content, "7");
        assert!(elem.has_class("btn"));
        assert!(elem.has_class("number"));
        assert_eq!(elem.get_attr("data-action"), Some("7"));
        assert_eq!(elem.get_attr("data-value"), Some("7"));

        let plus = button_element(keypad.find(Command::Operator(Operator::Add)).unwrap());
        assert!(plus.has_class("operator"));
        assert_eq!(plus.get_attr("data-value"), None);
    }

    #[test]
    fn test_keypad_per_tab() {
        let keypad = WasmKeypad::new();
        assert_eq!(keypad.for_tab(Tab::Scientific).len(), 2);
        let elem = keypad.create_keypad_element(Tab::Basic);
        assert_eq!(elem.id, "basic-keypad");
        assert_eq!(elem.children.len(), 24);
        // basic keypad is shared by two tabs
        assert_eq!(keypad.button_count(), 24 + 20 + 7 + 5 - 1);
    }

    #[test]
    fn test_handle_click() {
        let keypad = WasmKeypad::new();
        assert_eq!(keypad.handle_click("btn-9"), Some(Command::Digit(9)));
        assert_eq!(
            keypad.handle_click("btn-sqrt"),
            Some(Command::Function(Function::Sqrt))
        );
        assert_eq!(
            keypad.handle_click("btn-days-between"),
            Some(Command::Date(DateAction::DaysBetween))
        );
        assert_eq!(
            keypad.handle_click("tab-statistics"),
            Some(Command::SwitchTab(Tab::Statistics))
        );
        assert_eq!(keypad.handle_click("theme-switch"), Some(Command::ToggleTheme));
        assert_eq!(keypad.handle_click("btn-nope"), None);
        assert_eq!(keypad.handle_click("result"), None);
    }

    #[test]
    fn test_key_from_dom() {
        assert_eq!(WasmKeypad::key_from_dom("7"), Some(Key::Char('7')));
        assert_eq!(WasmKeypad::key_from_dom("Enter"), Some(Key::Enter));
        assert_eq!(WasmKeypad::key_from_dom("Escape"), Some(Key::Escape));
        assert_eq!(WasmKeypad::key_from_dom("Backspace"), Some(Key::Backspace));
        assert_eq!(WasmKeypad::key_from_dom("Shift"), None);
        assert_eq!(WasmKeypad::key_from_dom(""), None);
    }
}
