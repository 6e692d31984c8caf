//! Persisted user settings stored as `config.toml` in the app directory.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The application directory could not be resolved.
    #[error("Config directory unavailable: {0}")]
    Dir(#[from] app_dirs::AppDirError),
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Dataset opened most recently; pre-fills the launcher.
    #[serde(default)]
    pub last_base_path: Option<PathBuf>,
    #[serde(default)]
    pub review: ReviewSettings,
    #[serde(default)]
    pub window: WindowSettings,
}

/// Behaviour of review sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSettings {
    /// Seed the flagged set from earlier runs' error log so repeat flags are refused.
    #[serde(default = "default_true")]
    pub reload_flags_from_log: bool,
    /// Show the fourth panel when the dataset has an `Infer` folder.
    #[serde(default = "default_true")]
    pub show_inference: bool,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            reload_flags_from_log: true,
            show_inference: true,
        }
    }
}

/// Initial viewport size in logical points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_width() -> f32 {
    1100.0
}

fn default_height() -> f32 {
    400.0
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from the app directory, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    load_from(&config_path()?)
}

/// Persist settings to the app directory.
pub fn save(settings: &AppSettings) -> Result<(), ConfigError> {
    save_to_path(settings, &config_path()?)
}

pub fn load_from(path: &Path) -> Result<AppSettings, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppSettings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the TOML settings file atomically so a crash never leaves half a file.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |path: &Path, source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path.parent().ok_or_else(|| {
        write_err(
            path,
            std::io::Error::other("config path has no parent directory"),
        )
    })?;
    std::fs::create_dir_all(dir).map_err(|source| write_err(dir, source))?;

    let tmp_path = temp_sibling(path).map_err(|source| write_err(path, source))?;
    let result = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .and_then(|mut file| {
            file.write_all(data.as_bytes())?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&tmp_path, path));
    if let Err(source) = result {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(path, source));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> Result<PathBuf, std::io::Error> {
    use rand::TryRngCore;
    let mut bytes = [0u8; 6];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|err| std::io::Error::other(format!("temporary suffix: {err}")))?;
    let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
    Ok(path.with_file_name(format!("{name}.tmp-{suffix}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_dirs::ConfigBaseGuard;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let loaded = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(loaded, AppSettings::default());
        assert!(loaded.review.reload_flags_from_log);
        assert_eq!(loaded.window.width, 1100.0);
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let settings = AppSettings {
            last_base_path: Some(PathBuf::from("/data/gc107")),
            review: ReviewSettings {
                reload_flags_from_log: false,
                show_inference: true,
            },
            window: WindowSettings {
                width: 1400.0,
                height: 500.0,
            },
        };
        save_to_path(&settings, &path).unwrap();
        assert_eq!(load_from(&path).unwrap(), settings);
        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[review]\nshow_inference = false\n").unwrap();
        let loaded = load_from(&path).unwrap();
        assert!(!loaded.review.show_inference);
        assert!(loaded.review.reload_flags_from_log);
        assert_eq!(loaded.window, WindowSettings::default());
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "review = [").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(ConfigError::ParseToml { .. })
        ));
    }

    #[test]
    fn save_and_load_use_app_directory() {
        let dir = tempdir().unwrap();
        let _guard = ConfigBaseGuard::set(dir.path().to_path_buf());
        let settings = AppSettings {
            last_base_path: Some(PathBuf::from("dataset")),
            ..AppSettings::default()
        };
        save(&settings).unwrap();
        assert!(
            dir.path()
                .join(app_dirs::APP_DIR_NAME)
                .join(CONFIG_FILE_NAME)
                .is_file()
        );
        assert_eq!(load_or_default().unwrap(), settings);
    }
}
