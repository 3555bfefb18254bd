//! Command handlers
//!
//! Handlers compute their output and leave printing to the binary.

pub mod calc;
pub mod settings;
pub mod tui;

pub use calc::{execute_date, execute_keys, execute_stats, KeysOutput};
pub use settings::{execute_config, execute_theme};
pub use tui::execute_tui;
