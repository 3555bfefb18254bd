//! Terminal front end

mod app;
mod input;
mod keypad;
mod terminal;
mod ui;

pub use app::{CalculatorApp, DateField};
pub use input::{help, InputHandler, KeyAction};
pub use keypad::{group_color, hit_test, KeypadWidget};
pub use terminal::{run, TICK};
pub use ui::{render, CalculatorUI};
