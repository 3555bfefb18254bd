//! Property tests across the keypads and the widget

use calcwidget::core::format::format_number;
use calcwidget::keypad::Keypad;
use calcwidget::prelude::*;
use calcwidget::wasm::{button_id, WasmKeypad};
use proptest::prelude::*;

fn widget() -> Widget {
    Widget::new(WidgetConfig::new().with_rng_seed(99), Box::new(MemoryStore::new()))
}

fn tab_strategy() -> impl Strategy<Value = Tab> {
    prop_oneof![
        Just(Tab::Basic),
        Just(Tab::Scientific),
        Just(Tab::Statistics),
        Just(Tab::Date),
    ]
}

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Subtract),
        Just(Operator::Multiply),
        Just(Operator::Divide),
        Just(Operator::Power),
    ]
}

/// Any button on any tab
fn command_strategy() -> impl Strategy<Value = Command> {
    let commands: Vec<Command> = Tab::ALL
        .into_iter()
        .flat_map(Keypad::for_tab)
        .flat_map(|pad| pad.buttons().iter().map(|b| b.command).collect::<Vec<_>>())
        .collect();
    proptest::sample::select(commands)
}

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        4 => prop::char::range('0', '9').prop_map(Key::Char),
        2 => prop::sample::select(vec!['.', '+', '-', '*', '/', '=', 'x', 'q']).prop_map(Key::Char),
        1 => Just(Key::Enter),
        1 => Just(Key::Escape),
        1 => Just(Key::Backspace),
    ]
}

proptest! {
    /// Every button's action name parses back to the button's command
    #[test]
    fn prop_button_action_round_trip(command in command_strategy()) {
        prop_assert_eq!(Command::from_action(&command.action()), Some(command));
    }

    /// Every button id resolves to its command on click
    #[test]
    fn prop_button_id_resolves(command in command_strategy()) {
        let keypad = WasmKeypad::new();
        prop_assert_eq!(keypad.handle_click(&button_id(command)), Some(command));
    }

    /// Grid positions are unique within a keypad
    #[test]
    fn prop_grid_positions_unique(tab in tab_strategy()) {
        for pad in Keypad::for_tab(tab) {
            let (rows, cols) = pad.dimensions();
            for b in pad.buttons() {
                prop_assert!(b.row < rows && b.col < cols);
                prop_assert_eq!(pad.get_button_at(b.row, b.col), Some(b));
            }
        }
    }

    /// Random key presses always leave a readable display
    #[test]
    fn prop_keys_keep_display_readable(keys in prop::collection::vec(key_strategy(), 0..40)) {
        let mut w = widget();
        for key in keys {
            w.handle_key(key, 0);
        }
        let display = w.display();
        prop_assert!(!display.result.is_empty());
        prop_assert!(!display.result.contains("NaN"));
    }

    /// Random button presses never panic and never leave a non-finite operand
    #[test]
    fn prop_buttons_keep_state_finite(commands in prop::collection::vec(command_strategy(), 0..40)) {
        let mut w = widget();
        for command in commands {
            w.dispatch(command, 0);
        }
        if let Some(value) = w.state().current().value() {
            prop_assert!(value.is_finite());
        }
        prop_assert!(w.memory().value().is_finite());
    }

    /// Small integer arithmetic matches f64 arithmetic after display formatting
    #[test]
    fn prop_integer_arithmetic(a in 0u32..10_000, b in 1u32..10_000, op in operator_strategy()) {
        prop_assume!(op != Operator::Power);
        let mut w = widget();
        for key in Key::parse_sequence(&format!("{a}")) {
            w.handle_key(key, 0);
        }
        w.dispatch(Command::Operator(op), 0);
        for key in Key::parse_sequence(&format!("{b}{{enter}}")) {
            w.handle_key(key, 0);
        }
        let (a, b) = (f64::from(a), f64::from(b));
        let expected = match op {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
            Operator::Power => unreachable!(),
        };
        let expected = (expected * 1e8).round() / 1e8;
        prop_assert_eq!(w.display().result, format_number(expected));
    }
}
