//! calcwidget - a multi-mode calculator widget
//!
//! One session offers four tabs: an immediate-execution basic calculator
//! with a memory register, scientific functions, descriptive statistics over
//! a data set and date arithmetic. A light/dark theme preference persists in
//! a key-value store and short-lived notifications report what happened.
//!
//! The session ([`widget::Widget`]) is front-end neutral. The terminal front
//! end lives in [`tui`] and the browser front end in [`wasm`]; both are
//! exercised by the same scenarios through [`driver::CalculatorDriver`].
//!
//! # Example
//!
//! ```rust
//! use calcwidget::prelude::*;
//!
//! let mut widget = Widget::default();
//! for key in Key::parse_sequence("12+30{enter}") {
//!     widget.handle_key(key, 0);
//! }
//! assert_eq!(widget.display().result, "42");
//!
//! widget.dispatch(Command::Function(Function::Sqrt), 0);
//! assert_eq!(widget.display().result, "6.4807407");
//!
//! widget.set_stats_input("2, 4, 4, 4, 5, 5, 7, 9");
//! widget.dispatch(Command::Stats(StatsAction::AddData), 0);
//! widget.dispatch(Command::Stats(StatsAction::StdDev), 0);
//! assert_eq!(widget.stats_results(), "Standard Deviation: 2.0000");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod dates;
pub mod driver;
pub mod keypad;
pub mod notify;
pub mod stats;
pub mod theme;
pub mod widget;

#[cfg(feature = "tui")]
pub mod tui;

/// Browser front end; the mock DOM keeps it testable natively
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, ConfigResult, WidgetConfig};
    pub use crate::core::{
        transition, AngleMode, CalcError, CalcResult, CalculatorState, Effect, Function, Input,
        MemoryRegister, Notice, Operand, Operator,
    };
    pub use crate::dates::{DateAction, DateCalculator, DateError};
    pub use crate::driver::CalculatorDriver;
    pub use crate::keypad::{ButtonDef, ButtonGroup, Keypad};
    pub use crate::notify::{Notification, Notifier};
    pub use crate::stats::{DataSet, StatsAction, StatsError};
    pub use crate::theme::{JsonFileStore, KeyValueStore, MemoryStore, Theme, ThemePreference};
    pub use crate::widget::{Command, DisplayLines, Key, MemoryAction, Tab, Widget};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmCalculator, WasmDriver};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_pure_transition() {
        let (state, effects) = transition(CalculatorState::new(), Input::Digit(4));
        assert!(effects.is_empty());
        let (state, _) = transition(state, Input::Operator(Operator::Multiply));
        let (state, _) = transition(state, Input::Digit(5));
        let (state, _) = transition(state, Input::Evaluate);
        assert_eq!(state.result_line(), "20");
    }

    #[test]
    fn test_session_across_tabs() {
        let mut widget = Widget::new(
            WidgetConfig::new().with_rng_seed(11),
            Box::new(MemoryStore::new()),
        );
        widget.dispatch(Command::Digit(6), 0);
        widget.dispatch(Command::Memory(MemoryAction::Add), 0);

        widget.dispatch(Command::SwitchTab(Tab::Statistics), 0);
        widget.set_stats_input("1, 1, 2");
        widget.dispatch(Command::Stats(StatsAction::AddData), 0);
        widget.dispatch(Command::Stats(StatsAction::Mode), 0);
        assert_eq!(widget.stats_results(), "Mode: 1 (Frequency: 2)");

        widget.dispatch(Command::SwitchTab(Tab::Basic), 0);
        assert_eq!(widget.display().result, "6");
        assert_eq!(widget.memory().value(), 6.0);
    }

    #[test]
    fn test_refused_operation_keeps_state() {
        let mut widget = Widget::default();
        for key in Key::parse_sequence("2-3=") {
            widget.handle_key(key, 0);
        }
        let raised = widget.dispatch(Command::Function(Function::Sqrt), 0);
        assert_eq!(raised, vec![Notice::InvalidOperation]);
        assert_eq!(widget.display().result, "-1");
    }

    #[test]
    fn test_notices_have_messages() {
        for notice in [
            Notice::DivideByZero,
            Notice::InvalidOperation,
            Notice::MemoryCleared,
            Notice::MemoryRecalled,
            Notice::MemoryAdded,
            Notice::MemorySubtracted,
            Notice::AngleModeSwitched(AngleMode::Degrees),
        ] {
            assert!(!notice.message().is_empty());
        }
    }
}
