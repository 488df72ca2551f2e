use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SettingsError;
use crate::registry::KnownWorlds;

/// File name of the settings file inside a data directory.
pub const SETTINGS_FILE: &str = "settings.json";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_groups_file() -> String {
    "groups.json".to_string()
}

fn default_profiles_dir() -> String {
    "profiles".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_known_worlds() -> Vec<String> {
    vec![
        "world".to_string(),
        "world_nether".to_string(),
        "world_the_end".to_string(),
    ]
}

fn default_create_default_group() -> bool {
    true
}

/// Application settings, read from `settings.json` in the data directory.
///
/// Every field has a default, so a partial file (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Group document, relative to the data directory.
    #[serde(default = "default_groups_file")]
    pub groups_file: String,
    /// Root of the per-group profile directories, relative to the data
    /// directory.
    #[serde(default = "default_profiles_dir")]
    pub profiles_dir: String,
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Worlds the host is known to have.
    #[serde(default = "default_known_worlds")]
    pub known_worlds: Vec<String>,
    /// Create a `default` group holding every known world when there are no
    /// groups yet.
    #[serde(default = "default_create_default_group")]
    pub create_default_group: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            groups_file: default_groups_file(),
            profiles_dir: default_profiles_dir(),
            log_level: default_log_level(),
            known_worlds: default_known_worlds(),
            create_default_group: default_create_default_group(),
        }
    }
}

impl Settings {
    /// Load settings from `<dir>/settings.json`, falling back to defaults
    /// when the file does not exist.
    pub fn load(dir: &Path) -> Result<Self, SettingsError> {
        let path = dir.join(SETTINGS_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        let settings: Self =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write these settings to `<dir>/settings.json`.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, SettingsError> {
        let path = dir.join(SETTINGS_FILE);
        let io_err = |source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        };
        fs::create_dir_all(dir).map_err(io_err)?;
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(&path, json + "\n").map_err(io_err)?;
        Ok(path)
    }

    /// Reject unknown log levels and empty paths.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(SettingsError::Validation(format!(
                "log_level must be one of {}, got \"{}\"",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        if self.groups_file.trim().is_empty() {
            return Err(SettingsError::Validation(
                "groups_file must not be empty".to_string(),
            ));
        }
        if self.profiles_dir.trim().is_empty() {
            return Err(SettingsError::Validation(
                "profiles_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The group document inside `dir`.
    pub fn groups_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.groups_file)
    }

    /// The profile root inside `dir`.
    pub fn profiles_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.profiles_dir)
    }

    /// The configured worlds as a registry.
    pub fn registry(&self) -> KnownWorlds {
        KnownWorlds::new(self.known_worlds.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WorldRegistry;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"known_worlds": ["hub"], "log_level": "debug"}"#,
        )
        .unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.groups_file, "groups.json");
        assert!(settings.create_default_group);
        assert!(settings.registry().world_exists("hub"));
        assert!(!settings.registry().world_exists("world"));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            create_default_group: false,
            ..Settings::default()
        };
        let path = settings.save(dir.path()).unwrap();
        assert!(path.ends_with(SETTINGS_FILE));
        assert_eq!(Settings::load(dir.path()).unwrap(), settings);
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let settings = Settings {
            log_level: "loud".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Validation(_))
        ));
    }

    #[test]
    fn empty_groups_file_is_rejected() {
        let settings = Settings {
            groups_file: " ".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "{").unwrap();
        assert!(matches!(
            Settings::load(dir.path()),
            Err(SettingsError::Parse { .. })
        ));
    }
}
