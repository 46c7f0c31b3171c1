//! Application settings and paths.
//!
//! Scan defaults live in an XDG-compliant settings file so a user can pin
//! their own range, concurrency, and timeout without repeating flags. A
//! missing or unreadable settings file never blocks a scan; callers fall
//! back to the built-in defaults.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Scan defaults, overridable from the settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Port range spec used when `--range` is omitted.
    pub default_range: String,
    /// Worker count used when `--concurrency` is omitted.
    pub default_concurrency: usize,
    /// Per-probe timeout in milliseconds used when `--timeout` is omitted.
    pub default_timeout_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_range: "1-65535".to_string(),
            default_concurrency: 1000,
            default_timeout_ms: 1000,
        }
    }
}

impl AppSettings {
    /// Load settings from the default XDG location.
    ///
    /// An absent file is not an error; it yields the defaults.
    pub fn load() -> ConfigResult<Self> {
        let file = settings_file()?;
        if !file.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }
}

/// Path of the settings file (`~/.config/darter/settings.json` on Linux).
fn settings_file() -> ConfigResult<PathBuf> {
    let project =
        ProjectDirs::from("com", "darter", "darter").ok_or(ConfigError::DirectoryNotFound)?;
    Ok(project.config_dir().join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_range, "1-65535");
        assert_eq!(settings.default_concurrency, 1000);
        assert_eq!(settings.default_timeout_ms, 1000);
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "default_concurrency": 64 }}"#).unwrap();

        let settings = AppSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.default_concurrency, 64);
        assert_eq!(settings.default_range, "1-65535");
    }

    #[test]
    fn malformed_settings_are_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        assert!(matches!(
            AppSettings::load_from(file.path()),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error_when_named_explicitly() {
        assert!(matches!(
            AppSettings::load_from(Path::new("/nonexistent/settings.json")),
            Err(ConfigError::ReadFailed { .. })
        ));
    }
}
