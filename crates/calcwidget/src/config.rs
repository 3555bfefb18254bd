//! Widget configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::AngleMode;
use crate::widget::Tab;

/// Default notification lifetime in milliseconds
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 2000;

/// Default storage key for the theme preference
pub const DEFAULT_THEME_KEY: &str = "calculator-theme";

/// Result type for configuration and storage
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration and storage errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid JSON for the expected shape
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store refused the operation
    #[error("Storage unavailable: {message}")]
    Storage {
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an I/O error for `path`
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Widget configuration
///
/// Missing fields fall back to their defaults when loading JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// How long a notification stays visible
    pub notification_ttl_ms: u64,
    /// Angle mode at startup
    pub angle_mode: AngleMode,
    /// Storage key for the theme preference
    pub theme_key: String,
    /// Tab shown at startup
    pub default_tab: Tab,
    /// Seed for the random-number function; entropy when absent
    pub rng_seed: Option<u64>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            angle_mode: AngleMode::Degrees,
            theme_key: DEFAULT_THEME_KEY.to_string(),
            default_tab: Tab::Basic,
            rng_seed: None,
        }
    }
}

impl WidgetConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set notification lifetime
    #[must_use]
    pub const fn with_notification_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.notification_ttl_ms = ttl_ms;
        self
    }

    /// Set the startup angle mode
    #[must_use]
    pub const fn with_angle_mode(mut self, mode: AngleMode) -> Self {
        self.angle_mode = mode;
        self
    }

    /// Set the theme storage key
    #[must_use]
    pub fn with_theme_key(mut self, key: impl Into<String>) -> Self {
        self.theme_key = key.into();
        self
    }

    /// Set the startup tab
    #[must_use]
    pub const fn with_default_tab(mut self, tab: Tab) -> Self {
        self.default_tab = tab;
        self
    }

    /// Seed the random-number function
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Parse configuration from JSON text
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_json(&text)
    }
}
