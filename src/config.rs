/// User settings
///
/// Stored as JSON in the platform config directory:
/// - Linux: ~/.config/proofpair/settings.json
/// - macOS: ~/Library/Application Support/proofpair/settings.json
/// - Windows: %APPDATA%\proofpair\settings.json
///
/// Every field has a default, so a missing or partial file still loads.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::state::pairing::PairingRules;

const APP_DIR: &str = "proofpair";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Extension of transcript files, without the dot
    pub text_extension: String,

    /// Image extensions tried in order; the first existing file wins
    pub image_extensions: Vec<String>,

    /// Minutes between automatic saves (0 disables auto-save)
    pub auto_save_minutes: u64,

    /// Longest edge of the preview shown next to each text box, in pixels
    pub preview_size: u32,

    /// Folder opened most recently, used as the picker's starting point
    pub last_folder: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            text_extension: "txt".to_string(),
            image_extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
            auto_save_minutes: 10,
            preview_size: 300,
            last_folder: None,
        }
    }
}

impl Settings {
    /// Default location of the settings file
    pub fn default_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        path.push(APP_DIR);
        path.push(SETTINGS_FILE);
        Ok(path)
    }

    /// Load settings from the default location, falling back to defaults.
    ///
    /// A missing file is normal on first launch; a broken one is logged.
    pub fn load_or_default() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("{e}, using default settings");
                return Self::default();
            }
        };

        if !path.exists() {
            tracing::debug!("no settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("{e}, using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| Error::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Config {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| Error::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })?;

        fs::write(path, json).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the default location. Failure only costs the remembered folder.
    pub fn save(&self) {
        let result = Self::default_path().and_then(|path| self.save_to(&path));
        if let Err(e) = result {
            tracing::warn!("could not save settings: {e}");
        }
    }

    /// Auto-save period, or None when disabled
    pub fn auto_save_interval(&self) -> Option<Duration> {
        (self.auto_save_minutes > 0).then(|| Duration::from_secs(self.auto_save_minutes * 60))
    }

    /// File matching rules derived from these settings
    pub fn pairing_rules(&self) -> PairingRules {
        PairingRules {
            text_extension: self.text_extension.clone(),
            image_extensions: self.image_extensions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_folder_layout() {
        let settings = Settings::default();
        assert_eq!(settings.text_extension, "txt");
        assert_eq!(settings.image_extensions, ["png", "jpg", "jpeg"]);
        assert_eq!(settings.auto_save_interval(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "auto_save_minutes": 0 }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.auto_save_interval(), None);
        assert_eq!(settings.preview_size, 300);
        assert_eq!(settings.text_extension, "txt");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.last_folder = Some(PathBuf::from("/scans/box-3"));
        settings.image_extensions = vec!["tif".to_string()];
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_malformed_file_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigFormat { .. }));
        assert_eq!(err.path(), Some(&path));
    }
}
