//! Interactive terminal session

use calcwidget::theme::JsonFileStore;
use calcwidget::tui::{run, CalculatorApp};
use calcwidget::widget::Widget;
use tracing::info;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Runs the terminal widget until the user quits
pub fn execute_tui(config: &CliConfig) -> CliResult<()> {
    let store = JsonFileStore::new(&config.store_path);
    let widget = Widget::new(config.widget.clone(), Box::new(store));
    info!(theme = %widget.theme(), "starting terminal session");
    let mut app = CalculatorApp::new(widget);
    run(&mut app)?;
    Ok(())
}
