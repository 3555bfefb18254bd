//! Light/dark theme preference and the key-value stores that persist it

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{ConfigError, ConfigResult};

/// Color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// Stored value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored value; anything but `"dark"` reads as light
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        if value.trim() == "dark" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable string storage scoped to one origin or user
pub trait KeyValueStore: std::fmt::Debug {
    /// Reads a value
    fn get(&self, key: &str) -> ConfigResult<Option<String>>;

    /// Writes a value
    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object in a file
///
/// A missing file reads as empty. Every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at `path`; nothing is touched until the first access
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ConfigResult<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ConfigError::io(&self.path, e)),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        let text = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, text).map_err(|e| ConfigError::io(&self.path, e))?;
        info!(path = %self.path.display(), key, value, "store written");
        Ok(())
    }
}

/// Theme preference bound to a store
///
/// The stored value is read once at construction and written on every
/// toggle.
#[derive(Debug)]
pub struct ThemePreference {
    store: Box<dyn KeyValueStore>,
    key: String,
    theme: Theme,
}

impl ThemePreference {
    /// Loads the preference; a missing or unreadable value means light
    pub fn load(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let theme = match store.get(&key) {
            Ok(Some(value)) => Theme::from_stored(&value),
            Ok(None) => Theme::Light,
            Err(err) => {
                tracing::warn!(%err, "theme preference unreadable, using light");
                Theme::Light
            }
        };
        Self { store, key, theme }
    }

    /// Current theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Storage key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Flips the theme and persists it
    ///
    /// The in-memory theme flips even when the write fails.
    pub fn toggle(&mut self) -> ConfigResult<Theme> {
        self.theme = self.theme.toggled();
        info!(theme = %self.theme, "theme changed");
        self.store.set(&self.key, self.theme.as_str())?;
        Ok(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_THEME_KEY;

    #[derive(Debug)]
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> ConfigResult<Option<String>> {
            Err(ConfigError::storage("blocked"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> ConfigResult<()> {
            Err(ConfigError::storage("blocked"))
        }
    }

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("sepia"), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_preference_defaults_to_light() {
        let pref = ThemePreference::load(Box::new(MemoryStore::new()), DEFAULT_THEME_KEY);
        assert_eq!(pref.theme(), Theme::Light);
        assert_eq!(pref.key(), "calculator-theme");
    }

    #[test]
    fn test_preference_reads_stored_value() {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_THEME_KEY, "dark").unwrap();
        let pref = ThemePreference::load(Box::new(store), DEFAULT_THEME_KEY);
        assert_eq!(pref.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_round_trips_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut pref = ThemePreference::load(Box::new(JsonFileStore::new(&path)), "theme");
        assert_eq!(pref.toggle().unwrap(), Theme::Dark);

        let reloaded = ThemePreference::load(Box::new(JsonFileStore::new(&path)), "theme");
        assert_eq!(reloaded.theme(), Theme::Dark);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"theme\": \"dark\""));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("s.json"));
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get("a"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_failing_store_still_flips_theme() {
        let mut pref = ThemePreference::load(Box::new(FailingStore), "theme");
        assert_eq!(pref.theme(), Theme::Light);
        assert!(pref.toggle().is_err());
        assert_eq!(pref.theme(), Theme::Dark);
    }
}
