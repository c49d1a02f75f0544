use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Body class carrying this theme.
    pub fn body_class(&self) -> &'static str {
        match self {
            Theme::Light => "light-mode",
            Theme::Dark => "dark-mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(EngineError::InvalidTheme(other.to_string())),
        }
    }
}

/// Durable key-value storage. Either call may fail when the host has storage
/// disabled.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-memory store. `unavailable()` builds one that rejects every call, the
/// way a browser with storage disabled does.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.unavailable {
            return Err(EngineError::StorageUnavailable("storage disabled".into()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.unavailable {
            return Err(EngineError::StorageUnavailable("storage disabled".into()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Resolves and persists the color theme.
///
/// Lookup order is the session value, then the stored value, then the system
/// preference. Whatever the first lookup yields is kept for the session.
#[derive(Debug)]
pub struct ThemeBridge<S> {
    store: S,
    key: String,
    session: Option<Theme>,
}

impl<S: PreferenceStore> ThemeBridge<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            session: None,
        }
    }

    pub fn resolve_theme(&mut self, prefers_dark: bool) -> Theme {
        if let Some(theme) = self.session {
            return theme;
        }
        let stored = match self.store.get(&self.key) {
            Ok(Some(raw)) => match raw.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    log::warn!("[theme] ignoring stored value: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("[theme] {}", e);
                None
            }
        };
        let theme = stored.unwrap_or_else(|| Theme::from_system(prefers_dark));
        self.session = Some(theme);
        theme
    }

    /// Validates and persists `value`. Storage failures keep the theme for
    /// this session only.
    pub fn set_theme(&mut self, value: &str) -> Result<Theme> {
        let theme = value.parse::<Theme>()?;
        Ok(self.set(theme))
    }

    pub fn set(&mut self, theme: Theme) -> Theme {
        self.session = Some(theme);
        if let Err(e) = self.store.set(&self.key, theme.as_str()) {
            log::warn!("[theme] {}; keeping `{}` in memory", e, theme);
        }
        theme
    }

    pub fn toggle(&mut self, prefers_dark: bool) -> Theme {
        let next = self.resolve_theme(prefers_dark).toggled();
        self.set(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
