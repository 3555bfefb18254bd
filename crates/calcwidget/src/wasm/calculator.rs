//! DOM-bound widget
//!
//! [`WasmCalculator`] owns a [`Widget`] and the document it renders into.
//! DOM events go in, the widget runs the matching command and every bound
//! element is re-rendered from widget state.

use tracing::trace;

use super::dom::{ids, DomElement, DomEvent, MockDom};
use super::keypad::WasmKeypad;
use crate::config::WidgetConfig;
use crate::core::Notice;
use crate::theme::{KeyValueStore, MemoryStore, Theme};
use crate::widget::{Command, Tab, Widget};

/// Widget bound to a document
#[derive(Debug)]
pub struct WasmCalculator {
    widget: Widget,
    dom: MockDom,
    keypad: WasmKeypad,
}

impl Default for WasmCalculator {
    fn default() -> Self {
        Self::new(WidgetConfig::default(), Box::new(MemoryStore::new()))
    }
}

impl WasmCalculator {
    /// Creates the widget and renders the initial document
    #[must_use]
    pub fn new(config: WidgetConfig, store: Box<dyn KeyValueStore>) -> Self {
        Self::from_widget(Widget::new(config, store))
    }

    /// Binds an existing widget to a fresh document
    #[must_use]
    pub fn from_widget(widget: Widget) -> Self {
        let mut calc = Self {
            widget,
            dom: MockDom::calculator(),
            keypad: WasmKeypad::new(),
        };
        calc.sync_fields();
        calc.render(0);
        calc
    }

    /// The widget
    #[must_use]
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// The document
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Text of an element, empty when absent
    #[must_use]
    pub fn text(&self, id: &str) -> &str {
        self.dom.get_element_text(id).unwrap_or_default()
    }

    /// Handles one DOM event at `now_ms` and re-renders
    pub fn handle_event(&mut self, event: DomEvent, now_ms: u64) -> Vec<Notice> {
        trace!(?event, "dom event");
        self.dom.dispatch_event(event.clone());
        let notices = match event {
            DomEvent::Click { element_id } => match self.keypad.handle_click(&element_id) {
                Some(command) => self.widget.dispatch(command, now_ms),
                None => Vec::new(),
            },
            DomEvent::Input { element_id, value } => {
                self.read_field(&element_id, value);
                Vec::new()
            }
            DomEvent::KeyDown { key } => {
                if let Some(key) = WasmKeypad::key_from_dom(&key) {
                    self.widget.handle_key(key, now_ms);
                }
                Vec::new()
            }
            DomEvent::Change {
                element_id,
                checked,
            } => {
                let wants_dark = checked;
                if element_id == ids::THEME_SWITCH
                    && wants_dark != (self.widget.theme() == Theme::Dark)
                {
                    self.widget.dispatch(Command::ToggleTheme, now_ms)
                } else {
                    Vec::new()
                }
            }
        };
        self.render(now_ms);
        notices
    }

    /// Runs a command directly, as if its button was clicked
    pub fn dispatch(&mut self, command: Command, now_ms: u64) -> Vec<Notice> {
        let notices = self.widget.dispatch(command, now_ms);
        self.render(now_ms);
        notices
    }

    /// Drops expired notifications and re-renders
    pub fn tick(&mut self, now_ms: u64) {
        if self.widget.tick(now_ms) > 0 {
            self.render(now_ms);
        }
    }

    fn read_field(&mut self, id: &str, value: String) {
        match id {
            ids::DATA_INPUT => self.widget.set_stats_input(value),
            ids::START_DATE => self.widget.date_panel_mut().start = value,
            ids::END_DATE => self.widget.date_panel_mut().end = value,
            ids::DAYS_INPUT => self.widget.date_panel_mut().days = value,
            _ => {}
        }
    }

    fn sync_fields(&mut self) {
        let panel = self.widget.date_panel();
        let (start, end, days) = (panel.start.clone(), panel.end.clone(), panel.days.clone());
        self.dom.set_value(ids::START_DATE, &start);
        self.dom.set_value(ids::END_DATE, &end);
        self.dom.set_value(ids::DAYS_INPUT, &days);
    }

    /// Writes widget state into every bound element
    pub fn render(&mut self, now_ms: u64) {
        let display = self.widget.display();
        self.dom.set_element_text(ids::CALCULATION, &display.expression);
        self.dom.set_element_text(ids::RESULT, &display.result);
        self.dom
            .set_element_text(ids::ANGLE_MODE, self.widget.state().angle_mode().label());
        self.dom.set_value(ids::DATA_INPUT, self.widget.stats_input());
        self.dom
            .set_element_text(ids::DATA_VALUES, &self.widget.data_values());
        self.dom
            .set_element_text(ids::STATS_RESULTS, self.widget.stats_results());
        self.dom
            .set_element_text(ids::DATE_RESULTS, self.widget.date_results());

        let theme = self.widget.theme();
        self.dom.set_attr(ids::ROOT, "data-theme", theme.as_str());
        self.dom.set_element_text(ids::THEME, theme.as_str());
        self.dom.set_checked(ids::THEME_SWITCH, theme == Theme::Dark);

        let active = self.widget.tab();
        for tab in Tab::ALL {
            for id in [format!("tab-{}", tab.name()), format!("{}-tab", tab.name())] {
                if let Some(elem) = self.dom.get_element_mut(&id) {
                    if tab == active {
                        elem.add_class("active");
                    } else {
                        elem.remove_class("active");
                    }
                }
            }
        }

        self.dom.clear_children(ids::NOTIFICATIONS);
        let shown: Vec<DomElement> = self
            .widget
            .notifier()
            .visible(now_ms)
            .map(|n| {
                let elem = DomElement::new("div")
                    .with_class("notification")
                    .with_text(&n.message);
                if n.warning {
                    elem.with_class("warning")
                } else {
                    elem
                }
            })
            .collect();
        for elem in shown {
            self.dom.append_child(ids::NOTIFICATIONS, elem);
        }
    }
}
