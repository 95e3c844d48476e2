use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{LocalStorage, StorageError, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
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
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Invalid theme: {s}")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light/dark choice persisted under `pytutor-theme`.
pub struct ThemePreference {
    storage: Arc<dyn LocalStorage>,
    theme: Theme,
}

impl ThemePreference {
    /// Stored theme, or `fallback` when nothing valid is stored.
    pub fn load(storage: Arc<dyn LocalStorage>, fallback: Theme) -> Self {
        let theme = match storage.get_item(keys::THEME) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
                log::warn!("{err}; using {fallback}");
                fallback
            }),
            Ok(None) => fallback,
            Err(err) => {
                log::warn!("Failed to read theme preference: {err}");
                fallback
            }
        };
        Self { storage, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.theme = theme;
        self.storage.set_item(keys::THEME, theme.as_str())
    }

    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn falls_back_when_nothing_stored() {
        let storage = Arc::new(MemoryStorage::new());

        let preference = ThemePreference::load(storage, Theme::Dark);

        assert_eq!(preference.theme(), Theme::Dark);
    }

    #[test]
    fn invalid_stored_value_falls_back() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(keys::THEME, "sepia").unwrap();

        let preference = ThemePreference::load(storage, Theme::Light);

        assert_eq!(preference.theme(), Theme::Light);
    }

    #[test]
    fn toggle_persists_new_theme() {
        let storage = Arc::new(MemoryStorage::new());
        let mut preference = ThemePreference::load(storage.clone(), Theme::Dark);

        assert_eq!(preference.toggle().unwrap(), Theme::Light);

        assert_eq!(storage.get_item(keys::THEME).unwrap().as_deref(), Some("light"));
        let reloaded = ThemePreference::load(storage, Theme::Dark);
        assert_eq!(reloaded.theme(), Theme::Light);
    }

    #[test]
    fn set_writes_through() {
        let storage = Arc::new(MemoryStorage::new());
        let mut preference = ThemePreference::load(storage.clone(), Theme::Light);

        preference.set(Theme::Dark).unwrap();

        assert_eq!(storage.get_item(keys::THEME).unwrap().as_deref(), Some("dark"));
    }
}
