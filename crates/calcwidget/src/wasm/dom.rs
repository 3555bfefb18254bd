//! Mock DOM for the browser front end
//!
//! Models just enough of a document to run the widget without a browser:
//! elements addressed by id, text content, attributes, classes and a flat
//! child list. Events are recorded so tests can check what was dispatched.

use std::collections::HashMap;

use crate::keypad::Keypad;
use crate::widget::Tab;

/// Ids of the elements the widget renders into
pub mod ids {
    /// Root element; carries `data-theme`
    pub const ROOT: &str = "calculator";
    /// Pending-expression line
    pub const CALCULATION: &str = "calculation";
    /// Current-value line
    pub const RESULT: &str = "result";
    /// Statistics input field
    pub const DATA_INPUT: &str = "data-input";
    /// Data-values line
    pub const DATA_VALUES: &str = "data-values";
    /// Statistics results line
    pub const STATS_RESULTS: &str = "stats-results";
    /// Start date field
    pub const START_DATE: &str = "start-date";
    /// End date field
    pub const END_DATE: &str = "end-date";
    /// Day count field
    pub const DAYS_INPUT: &str = "days-input";
    /// Date results line
    pub const DATE_RESULTS: &str = "date-results";
    /// Notification container
    pub const NOTIFICATIONS: &str = "notifications";
    /// Theme checkbox
    pub const THEME_SWITCH: &str = "theme-switch";
    /// Theme label
    pub const THEME: &str = "theme";
    /// Angle mode indicator
    pub const ANGLE_MODE: &str = "angle-mode";
}

/// A DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element id
    pub id: String,
    /// Tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates an element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the id
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Replaces the text content
    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text_content);
    }

    /// Adds a class unless present
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks for a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Reads an attribute
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Form value (`value` attribute), empty when unset
    #[must_use]
    pub fn value(&self) -> &str {
        self.get_attr("value").unwrap_or_default()
    }
}

/// Events the mock DOM accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click on an element
    Click {
        /// Clicked element
        element_id: String,
    },
    /// New value typed into a field
    Input {
        /// Field id
        element_id: String,
        /// New value
        value: String,
    },
    /// Key pressed anywhere in the document
    KeyDown {
        /// `KeyboardEvent.key` value, e.g. `"7"` or `"Enter"`
        key: String,
    },
    /// Checkbox toggled
    Change {
        /// Checkbox id
        element_id: String,
        /// New checked state
        checked: bool,
    },
}

impl DomEvent {
    /// Click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }

    /// Key-down event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }

    /// Change event
    #[must_use]
    pub fn change(element_id: &str, checked: bool) -> Self {
        Self::Change {
            element_id: element_id.to_string(),
            checked,
        }
    }
}

/// Flat element registry standing in for a document
#[derive(Debug, Default)]
pub struct MockDom {
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the widget document: tab bar, one content section per tab,
    /// displays, panel fields and the notification container
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();
        dom.register_element(
            DomElement::new("div")
                .with_id(ids::ROOT)
                .with_class("calculator")
                .with_attr("data-theme", "light"),
        );

        for tab in Tab::ALL {
            dom.register_element(
                DomElement::new("button")
                    .with_id(&format!("tab-{}", tab.name()))
                    .with_class("tab-button")
                    .with_attr("data-tab", tab.name())
                    .with_text(tab.title()),
            );
            let mut content = DomElement::new("section")
                .with_id(&format!("{}-tab", tab.name()))
                .with_class("tab-content");
            for keypad in Keypad::for_tab(tab) {
                content = keypad
                    .buttons()
                    .iter()
                    .fold(content, |c, b| c.with_child(super::keypad::button_element(b)));
            }
            dom.register_element(content);
        }

        for (id, tag) in [
            (ids::CALCULATION, "div"),
            (ids::RESULT, "div"),
            (ids::ANGLE_MODE, "span"),
            (ids::DATA_VALUES, "div"),
            (ids::STATS_RESULTS, "div"),
            (ids::DATE_RESULTS, "div"),
            (ids::NOTIFICATIONS, "div"),
            (ids::THEME, "span"),
        ] {
            dom.register_element(DomElement::new(tag).with_id(id));
        }

        for (id, kind) in [
            (ids::DATA_INPUT, "text"),
            (ids::START_DATE, "date"),
            (ids::END_DATE, "date"),
            (ids::DAYS_INPUT, "number"),
            (ids::THEME_SWITCH, "checkbox"),
        ] {
            dom.register_element(DomElement::new("input").with_id(id).with_attr("type", kind));
        }

        dom
    }

    /// Registers an element (and its id-bearing children) for lookup
    pub fn register_element(&mut self, element: DomElement) {
        for child in &element.children {
            if !child.id.is_empty() {
                self.elements.insert(child.id.clone(), child.clone());
            }
        }
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Element by id
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Mutable element by id
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Records an event and applies its effect on form fields
    pub fn dispatch_event(&mut self, event: DomEvent) {
        match &event {
            DomEvent::Input { element_id, value } => self.set_value(element_id, value),
            DomEvent::Change {
                element_id,
                checked,
            } => self.set_checked(element_id, *checked),
            DomEvent::Click { .. } | DomEvent::KeyDown { .. } => {}
        }
        self.event_history.push(event);
    }

    /// Events dispatched so far
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Forgets recorded events
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Replaces an element's text
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// An element's text
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Sets a field's value
    pub fn set_value(&mut self, id: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.attributes.insert("value".to_string(), value.to_string());
        }
    }

    /// A field's value
    #[must_use]
    pub fn get_value(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(DomElement::value)
    }

    /// Sets or clears a checkbox's `checked` attribute
    pub fn set_checked(&mut self, id: &str, checked: bool) {
        if let Some(elem) = self.elements.get_mut(id) {
            if checked {
                elem.attributes.insert("checked".into(), "true".into());
            } else {
                elem.attributes.remove("checked");
            }
        }
    }

    /// Sets an attribute
    pub fn set_attr(&mut self, id: &str, key: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.attributes.insert(key.to_string(), value.to_string());
        }
    }

    /// Appends a child to a parent
    pub fn append_child(&mut self, parent_id: &str, child: DomElement) {
        if let Some(parent) = self.elements.get_mut(parent_id) {
            parent.children.push(child.clone());
        }
        if !child.id.is_empty() {
            self.elements.insert(child.id.clone(), child);
        }
    }

    /// Removes every child of an element
    pub fn clear_children(&mut self, id: &str) {
        let Some(elem) = self.elements.get_mut(id) else {
            return;
        };
        let removed: Vec<String> = elem
            .children
            .drain(..)
            .map(|c| c.id)
            .filter(|id| !id.is_empty())
            .collect();
        for child_id in removed {
            self.elements.remove(&child_id);
        }
    }

    /// Texts of an element's children
    #[must_use]
    pub fn child_texts(&self, id: &str) -> Vec<String> {
        self.elements
            .get(id)
            .map(|e| e.children.iter().map(|c| c.text_content.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== DomElement =====

    #[test]
    fn test_element_builder() {
        let elem = DomElement::new("button")
            .with_id("btn-7")
            .with_text("7")
            .with_class("btn")
            .with_class("btn")
            .with_attr("data-value", "7");
        assert_eq!(elem.tag, "button");
        assert_eq!(elem.id, "btn-7");
        assert_eq!(elem.text_content, "7");
        assert_eq!(elem.classes, vec!["btn"]);
        assert_eq!(elem.get_attr("data-value"), Some("7"));
        assert_eq!(DomElement::default().tag, "div");
    }

    #[test]
    fn test_element_classes() {
        let mut elem = DomElement::new("div").with_class("tab-content");
        elem.add_class("active");
        assert!(elem.has_class("active"));
        elem.remove_class("active");
        assert!(!elem.has_class("active"));
    }

    #[test]
    fn test_element_value() {
        let elem = DomElement::new("input");
        assert_eq!(elem.value(), "");
        let elem = elem.with_attr("value", "1,2");
        assert_eq!(elem.value(), "1,2");
    }

    // ===== MockDom =====

    #[test]
    fn test_calculator_document() {
        let dom = MockDom::calculator();
        for id in [
            ids::ROOT,
            ids::CALCULATION,
            ids::RESULT,
            ids::DATA_INPUT,
            ids::DATA_VALUES,
            ids::STATS_RESULTS,
            ids::START_DATE,
            ids::END_DATE,
            ids::DAYS_INPUT,
            ids::DATE_RESULTS,
            ids::NOTIFICATIONS,
            ids::THEME_SWITCH,
            ids::THEME,
            "tab-basic",
            "basic-tab",
            "date-tab",
        ] {
            assert!(dom.get_element(id).is_some(), "missing #{id}");
        }
        assert_eq!(
            dom.get_element(ids::ROOT).unwrap().get_attr("data-theme"),
            Some("light")
        );
        assert_eq!(dom.get_element("tab-statistics").unwrap().text_content, "Statistics");
    }

    #[test]
    fn test_calculator_document_registers_buttons() {
        let dom = MockDom::calculator();
        assert!(dom.get_element("btn-7").is_some());
        assert!(dom.get_element("btn-sin").is_some());
        assert!(dom.get_element("btn-mean").is_some());
        assert!(dom.get_element("btn-week-number").is_some());
    }

    #[test]
    fn test_input_event_sets_value() {
        let mut dom = MockDom::calculator();
        dom.dispatch_event(DomEvent::input(ids::DATA_INPUT, "1, 2"));
        assert_eq!(dom.get_value(ids::DATA_INPUT), Some("1, 2"));
        assert_eq!(dom.event_history().len(), 1);
        dom.clear_event_history();
        assert!(dom.event_history().is_empty());
    }

    #[test]
    fn test_change_event_toggles_checked() {
        let mut dom = MockDom::calculator();
        dom.dispatch_event(DomEvent::change(ids::THEME_SWITCH, true));
        assert_eq!(
            dom.get_element(ids::THEME_SWITCH).unwrap().get_attr("checked"),
            Some("true")
        );
        dom.dispatch_event(DomEvent::change(ids::THEME_SWITCH, false));
        assert_eq!(
            dom.get_element(ids::THEME_SWITCH).unwrap().get_attr("checked"),
            None
        );
    }

    #[test]
    fn test_text_and_attrs() {
        let mut dom = MockDom::calculator();
        dom.set_element_text(ids::RESULT, "42");
        assert_eq!(dom.get_element_text(ids::RESULT), Some("42"));
        dom.set_attr(ids::ROOT, "data-theme", "dark");
        assert_eq!(
            dom.get_element(ids::ROOT).unwrap().get_attr("data-theme"),
            Some("dark")
        );
        assert_eq!(dom.get_element_text("nope"), None);
    }

    #[test]
    fn test_children() {
        let mut dom = MockDom::calculator();
        dom.append_child(
            ids::NOTIFICATIONS,
            DomElement::new("div").with_id("n-1").with_text("Memory cleared"),
        );
        dom.append_child(ids::NOTIFICATIONS, DomElement::new("div").with_text("two"));
        assert_eq!(dom.child_texts(ids::NOTIFICATIONS), vec!["Memory cleared", "two"]);
        assert!(dom.get_element("n-1").is_some());

        dom.clear_children(ids::NOTIFICATIONS);
        assert!(dom.child_texts(ids::NOTIFICATIONS).is_empty());
        assert!(dom.get_element("n-1").is_none());
    }

    #[test]
    fn test_event_constructors() {
        assert_eq!(
            DomEvent::key_down("Enter"),
            DomEvent::KeyDown {
                key: "Enter".into()
            }
        );
        assert!(matches!(DomEvent::click("btn-1"), DomEvent::Click { element_id } if element_id == "btn-1"));
    }
}
