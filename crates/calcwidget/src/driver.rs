//! Front-end-agnostic scenario driver
//!
//! A [`CalculatorDriver`] presses keys and clicks buttons on some front end
//! and reads the display back. The `verify_*` scenarios are written once
//! against the trait and run on the terminal app and the browser widget
//! alike.

/// Interactions every front end supports
///
/// # Example
///
/// ```rust,ignore
/// fn verify_sum<D: CalculatorDriver>(driver: &mut D) {
///     driver.press("2+3{enter}");
///     assert_eq!(driver.result_line(), "5");
/// }
/// ```
pub trait CalculatorDriver {
    /// Types a key sequence (see [`crate::widget::Key::parse_sequence`])
    fn press(&mut self, keys: &str);

    /// Clicks the button with the given action name; false if there is none
    fn click(&mut self, action: &str) -> bool;

    /// Pending-expression line
    fn expression_line(&self) -> String;

    /// Current-value line
    fn result_line(&self) -> String;

    /// Visible notification texts
    fn notifications(&self) -> Vec<String>;

    /// Returns the calculator to its initial state
    fn clear(&mut self);
}

/// Terminal driver
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::CalculatorDriver;
    use crate::tui::CalculatorApp;
    use crate::widget::{Command, Key};

    /// Drives a [`CalculatorApp`] through its key handler
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
        now_ms: u64,
    }

    impl TuiDriver {
        /// Creates a driver over a default app
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a driver over an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app, now_ms: 0 }
        }

        /// The app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Mutable app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }

        /// Moves the driver clock forward
        pub fn advance(&mut self, ms: u64) {
            self.now_ms += ms;
            self.app.tick(self.now_ms);
        }
    }

    fn key_event(key: Key) -> KeyEvent {
        let code = match key {
            Key::Char(c) => KeyCode::Char(c),
            Key::Enter => KeyCode::Enter,
            Key::Escape => KeyCode::Esc,
            Key::Backspace => KeyCode::Backspace,
        };
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, keys: &str) {
            for key in Key::parse_sequence(keys) {
                self.app.handle_key_event(key_event(key), self.now_ms);
            }
        }

        fn click(&mut self, action: &str) -> bool {
            match Command::from_action(action) {
                Some(command) => {
                    self.app.dispatch(command, self.now_ms);
                    true
                }
                None => false,
            }
        }

        fn expression_line(&self) -> String {
            self.app.widget().display().expression
        }

        fn result_line(&self) -> String {
            self.app.widget().display().result
        }

        fn notifications(&self) -> Vec<String> {
            self.app.widget().notifications(self.now_ms)
        }

        fn clear(&mut self) {
            self.app.dispatch(Command::Clear, self.now_ms);
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

/// Sums, differences, products and quotients
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.press("2+3=");
    assert_eq!(driver.result_line(), "5");
    driver.clear();

    driver.press("10-4{enter}");
    assert_eq!(driver.result_line(), "6");
    driver.clear();

    driver.press("6*7=");
    assert_eq!(driver.result_line(), "42");
    driver.clear();

    driver.press("20/4=");
    assert_eq!(driver.result_line(), "5");
    driver.clear();
}

/// Operators collapse left to right as they are chosen
pub fn verify_chained_operations<D: CalculatorDriver>(driver: &mut D) {
    driver.press("2+3*");
    assert_eq!(driver.expression_line(), "5 ×");
    driver.press("4=");
    assert_eq!(driver.result_line(), "20");
    assert_eq!(driver.expression_line(), "");
    driver.clear();
}

/// Binary float noise is rounded away; big values switch to exponent form
pub fn verify_number_display<D: CalculatorDriver>(driver: &mut D) {
    driver.press("0.1+0.2=");
    assert_eq!(driver.result_line(), "0.3");
    driver.clear();

    driver.press("1234567");
    assert_eq!(driver.result_line(), "1,234,567");
    driver.clear();

    driver.press("999999999*10=");
    assert_eq!(driver.result_line(), "1.000000e+10");
    driver.clear();
}

/// Division by zero is refused and reported, the pending expression kept
pub fn verify_divide_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.press("5/0=");
    assert_eq!(driver.expression_line(), "5 ÷");
    assert!(driver
        .notifications()
        .iter()
        .any(|n| n == "Cannot divide by zero!"));
    driver.clear();
}

/// Backspace and clear-entry edit only the current operand
pub fn verify_editing<D: CalculatorDriver>(driver: &mut D) {
    driver.press("123{bs}");
    assert_eq!(driver.result_line(), "12");
    driver.press("+45");
    assert!(driver.click("clear-entry"));
    assert_eq!(driver.result_line(), "0");
    assert_eq!(driver.expression_line(), "12 +");
    driver.press("9{bs}");
    assert_eq!(driver.result_line(), "0");
    driver.press("{esc}");
    assert_eq!(driver.expression_line(), "");
}

/// M+ / MR round trip
pub fn verify_memory<D: CalculatorDriver>(driver: &mut D) {
    driver.press("7");
    assert!(driver.click("memory-add"));
    driver.clear();
    assert!(driver.click("memory-recall"));
    assert_eq!(driver.result_line(), "7");
    assert!(driver.notifications().iter().any(|n| n == "Added to memory"));
    assert!(driver.click("memory-clear"));
    driver.clear();
}

/// Scientific buttons act on the current operand
pub fn verify_scientific<D: CalculatorDriver>(driver: &mut D) {
    assert!(driver.click("tab-scientific"));
    driver.press("9");
    assert!(driver.click("sqrt"));
    assert_eq!(driver.result_line(), "3");
    assert!(driver.click("factorial"));
    assert_eq!(driver.result_line(), "6");
    assert!(driver.click("tab-basic"));
    driver.clear();
}

/// Runs every scenario in order
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_chained_operations(driver);
    verify_number_display(driver);
    verify_divide_by_zero(driver);
    verify_editing(driver);
    verify_memory(driver);
    verify_scientific(driver);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "tui")]
    mod tui_tests {
        use super::*;
        use crate::widget::Tab;

        #[test]
        fn test_tui_driver_starts_at_zero() {
            let driver = TuiDriver::new();
            assert_eq!(driver.result_line(), "0");
            assert_eq!(driver.expression_line(), "");
        }

        #[test]
        fn test_tui_driver_click() {
            let mut driver = TuiDriver::new();
            assert!(driver.click("tab-date"));
            assert_eq!(driver.app().widget().tab(), Tab::Date);
            assert!(!driver.click("not-a-button"));
        }

        #[test]
        fn test_tui_driver_notifications_expire() {
            let mut driver = TuiDriver::new();
            driver.press("1/0=");
            assert_eq!(driver.notifications().len(), 1);
            driver.advance(2000);
            assert!(driver.notifications().is_empty());
        }

        #[test]
        fn test_unified_basic_arithmetic() {
            verify_basic_arithmetic(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_chained_operations() {
            verify_chained_operations(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_number_display() {
            verify_number_display(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_divide_by_zero() {
            verify_divide_by_zero(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_editing() {
            verify_editing(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_memory() {
            verify_memory(&mut TuiDriver::new());
        }

        #[test]
        fn test_unified_scientific() {
            verify_scientific(&mut TuiDriver::new());
        }

        #[test]
        fn test_all_scenarios() {
            run_all_scenarios(&mut TuiDriver::new());
        }
    }
}
