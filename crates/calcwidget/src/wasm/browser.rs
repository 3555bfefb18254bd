//! wasm-bindgen entry point
//!
//! [`BrowserCalculator`] is what page scripts construct. It keeps the theme
//! in `localStorage`, takes time from `Date.now()` and writes its state into
//! the real document using the same element ids as the mock DOM.

use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::{console, Document};

use super::dom::ids;
use super::keypad::WasmKeypad;
use crate::config::{ConfigError, ConfigResult, WidgetConfig};
use crate::theme::{KeyValueStore, Theme};
use crate::widget::{Command, Tab, Widget};

/// `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> ConfigResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| ConfigError::storage("no window"))?
            .local_storage()
            .map_err(|e| ConfigError::storage(format!("{e:?}")))?
            .ok_or_else(|| ConfigError::storage("localStorage unavailable"))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ConfigError::storage(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ConfigError::storage(format!("{e:?}")))
    }
}

fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

/// Browser widget
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    widget: Widget,
    keypad: WasmKeypad,
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Creates the widget with the theme read from `localStorage`
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self::with_widget(Widget::new(
            WidgetConfig::default(),
            Box::new(LocalStorageStore),
        ))
    }

    /// Handles a click on the element with `element_id`
    pub fn click(&mut self, element_id: &str) -> bool {
        self.click_at(element_id, now_ms())
    }

    /// Handles a `keydown` with the given `KeyboardEvent.key`
    pub fn key(&mut self, key: &str) -> bool {
        self.key_at(key, now_ms())
    }

    /// Runs a command by action name
    pub fn action(&mut self, action: &str) -> bool {
        match Command::from_action(action) {
            Some(command) => {
                self.widget.dispatch(command, now_ms());
                true
            }
            None => false,
        }
    }

    /// Statistics input field changed
    #[wasm_bindgen(js_name = setDataInput)]
    pub fn set_data_input(&mut self, value: String) {
        self.widget.set_stats_input(value);
    }

    /// Date fields changed
    #[wasm_bindgen(js_name = setDateFields)]
    pub fn set_date_fields(&mut self, start: String, end: String, days: String) {
        let panel = self.widget.date_panel_mut();
        panel.start = start;
        panel.end = end;
        panel.days = days;
    }

    /// Pending-expression line
    #[wasm_bindgen(getter)]
    pub fn expression(&self) -> String {
        self.widget.display().expression
    }

    /// Current-value line
    #[wasm_bindgen(getter)]
    pub fn result(&self) -> String {
        self.widget.display().result
    }

    /// `"light"` or `"dark"`
    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.widget.theme().as_str().to_string()
    }

    /// Active tab name
    #[wasm_bindgen(getter)]
    pub fn tab(&self) -> String {
        self.widget.tab().name().to_string()
    }

    /// Visible notifications, one per line
    pub fn notifications(&self) -> String {
        self.widget.notifications(now_ms()).join("\n")
    }

    /// Writes the widget state into the page
    pub fn render(&mut self) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let now = now_ms();
        self.widget.tick(now);
        let display = self.widget.display();

        set_text(&document, ids::CALCULATION, &display.expression);
        set_text(&document, ids::RESULT, &display.result);
        set_text(&document, ids::ANGLE_MODE, self.widget.state().angle_mode().label());
        set_text(&document, ids::DATA_VALUES, &self.widget.data_values());
        set_text(&document, ids::STATS_RESULTS, self.widget.stats_results());
        set_text(&document, ids::DATE_RESULTS, self.widget.date_results());
        set_text(&document, ids::NOTIFICATIONS, &self.widget.notifications(now).join("\n"));

        let theme = self.widget.theme();
        if let Some(root) = document.get_element_by_id(ids::ROOT) {
            root.set_attribute("data-theme", theme.as_str())?;
        }
        if let Some(switch) = document.get_element_by_id(ids::THEME_SWITCH) {
            if theme == Theme::Dark {
                switch.set_attribute("checked", "")?;
            } else {
                switch.remove_attribute("checked")?;
            }
        }
        for tab in Tab::ALL {
            let active = tab == self.widget.tab();
            for id in [format!("tab-{}", tab.name()), format!("{}-tab", tab.name())] {
                if let Some(elem) = document.get_element_by_id(&id) {
                    let classes = elem.class_list();
                    if active {
                        classes.add_1("active")?;
                    } else {
                        classes.remove_1("active")?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl BrowserCalculator {
    /// Wraps an existing widget
    #[must_use]
    pub fn with_widget(widget: Widget) -> Self {
        Self {
            widget,
            keypad: WasmKeypad::new(),
        }
    }

    /// The widget
    #[must_use]
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    /// Click at an explicit time
    pub fn click_at(&mut self, element_id: &str, now_ms: u64) -> bool {
        match self.keypad.handle_click(element_id) {
            Some(command) => {
                debug!(element_id, "click");
                self.widget.dispatch(command, now_ms);
                true
            }
            None => false,
        }
    }

    /// Key press at an explicit time
    pub fn key_at(&mut self, key: &str, now_ms: u64) -> bool {
        WasmKeypad::key_from_dom(key).is_some_and(|k| self.widget.handle_key(k, now_ms))
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(elem) = document.get_element_by_id(id) {
        elem.set_text_content(Some(text));
    }
}

/// Module start hook
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"calcwidget initialized".into());
}
