//! Theme Preference
//!
//! A light/dark preference persisted through a [`ThemeStore`]. The preference
//! object is created once at startup and handed to whatever renders output;
//! there is no process-wide theme.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Storage key used by the browser front end
pub const THEME_STORAGE_KEY: &str = "theme";

/// Two-valued display preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

/// Errors raised while reading or persisting the theme
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Unknown theme: {0:?} (expected \"light\" or \"dark\")")]
    Unknown(String),

    #[error("Theme storage unavailable")]
    Unavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable storage for the preference
pub trait ThemeStore {
    /// Stored theme, or `None` when nothing usable is stored
    fn load(&self) -> Option<Theme>;

    /// Persist the theme
    fn save(&self, theme: Theme) -> Result<(), ThemeError>;
}

/// Current theme plus the store it is persisted to
pub struct ThemePreference<S: ThemeStore> {
    store: S,
    current: Theme,
}

impl<S: ThemeStore> ThemePreference<S> {
    /// Initialize from the store, falling back to light
    pub fn load(store: S) -> Self {
        let current = store.load().unwrap_or_default();
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Persist `theme`, then make it current
    pub fn set(&mut self, theme: Theme) -> Result<(), ThemeError> {
        self.store.save(theme)?;
        self.current = theme;
        Ok(())
    }

    /// Switch to the other theme and return it
    pub fn toggle(&mut self) -> Result<Theme, ThemeError> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(feature = "native")]
pub use file_store::FileThemeStore;

#[cfg(feature = "native")]
mod file_store {
    use super::{Theme, ThemeError, ThemeStore};
    use std::path::{Path, PathBuf};

    /// Theme stored as the literal text `light` or `dark` in a file
    #[derive(Debug, Clone)]
    pub struct FileThemeStore {
        path: PathBuf,
    }

    impl FileThemeStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `<config dir>/legal-assistant/theme`
        pub fn default_path() -> PathBuf {
            dirs::config_dir()
                .map(|p| p.join("legal-assistant").join("theme"))
                .unwrap_or_else(|| PathBuf::from("./.legal-assistant-theme"))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl ThemeStore for FileThemeStore {
        fn load(&self) -> Option<Theme> {
            let content = std::fs::read_to_string(&self.path).ok()?;
            match content.parse() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!("Ignoring stored theme in {:?}: {}", self.path, e);
                    None
                }
            }
        }

        fn save(&self, theme: Theme) -> Result<(), ThemeError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, theme.as_str())?;
            tracing::debug!("Saved theme {} to {:?}", theme, self.path);
            Ok(())
        }
    }
}
