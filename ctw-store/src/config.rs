//! Typed application settings loaded at startup and saved on change.

use crate::settings::{keys, SettingsStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
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

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow::anyhow!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub theme: Theme,
    pub use_real_time_data: bool,
}

impl AppConfig {
    /// Read the config. Missing or unreadable values fall back to the
    /// defaults (light theme, demo data).
    pub fn load(store: &dyn SettingsStore) -> anyhow::Result<Self> {
        let theme = match store.get(keys::THEME)? {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                log::warn!("ignoring stored theme: {}", e);
                Theme::default()
            }),
            None => Theme::default(),
        };
        let use_real_time_data = store.get(keys::USE_REAL_TIME_DATA)?.as_deref() == Some("true");
        Ok(AppConfig {
            theme,
            use_real_time_data,
        })
    }

    pub fn save(&self, store: &dyn SettingsStore) -> anyhow::Result<()> {
        store.set(keys::THEME, self.theme.as_str())?;
        store.set(
            keys::USE_REAL_TIME_DATA,
            if self.use_real_time_data { "true" } else { "false" },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, MemoryStore};

    #[test]
    fn defaults_when_empty() {
        let config = AppConfig::load(&MemoryStore::default()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.theme, Theme::Light);
        assert!(!config.use_real_time_data);
    }

    #[test]
    fn load_save_round_trip() {
        let db = Database::new().unwrap();
        let config = AppConfig {
            theme: Theme::Dark,
            use_real_time_data: true,
        };
        config.save(&db).unwrap();
        assert_eq!(db.get(keys::USE_REAL_TIME_DATA).unwrap().as_deref(), Some("true"));
        assert_eq!(AppConfig::load(&db).unwrap(), config);
    }

    #[test]
    fn bad_theme_falls_back() {
        let store = MemoryStore::default();
        store.set(keys::THEME, "sepia").unwrap();
        store.set(keys::USE_REAL_TIME_DATA, "yes").unwrap();
        let config = AppConfig::load(&store).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert!(!config.use_real_time_data);
    }

    #[test]
    fn theme_parsing() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
