//! Interactive calculator widget in the terminal
//!
//! Run with: cargo run --example calculator_tui --features tui

use calcwidget::config::WidgetConfig;
use calcwidget::theme::JsonFileStore;
use calcwidget::tui::{run, CalculatorApp};
use calcwidget::widget::Widget;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::new(std::env::temp_dir().join("calcwidget-example.json"));
    let mut app = CalculatorApp::new(Widget::new(WidgetConfig::default(), Box::new(store)));
    run(&mut app)?;
    Ok(())
}
