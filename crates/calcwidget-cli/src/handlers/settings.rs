//! Theme and configuration commands

use calcwidget::theme::{JsonFileStore, Theme, ThemePreference};
use tracing::info;

use crate::commands::{ThemeAction, ThemeArgs};
use crate::config::CliConfig;
use crate::error::CliResult;

/// Shows the persisted theme, toggling it first when asked
pub fn execute_theme(config: &CliConfig, args: &ThemeArgs) -> CliResult<Theme> {
    let store = JsonFileStore::new(&config.store_path);
    let mut preference = ThemePreference::load(Box::new(store), config.widget.theme_key.clone());
    match args.action {
        Some(ThemeAction::Toggle) => {
            let theme = preference.toggle()?;
            info!(%theme, path = %config.store_path.display(), "theme toggled");
            Ok(theme)
        }
        None => Ok(preference.theme()),
    }
}

/// Effective configuration as pretty JSON
pub fn execute_config(config: &CliConfig) -> CliResult<String> {
    config.to_json()
}
