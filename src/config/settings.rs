//! User-level configuration, loaded from `settings.json` in the
//! platform config directory (e.g. `~/.config/rune/` on Linux).
//!
//! Every field has a sensible default so Rune works out-of-the-box
//! without any config file at all.  The settings pick the algorithm
//! used for *new* encrypted fields and where the vault file lives;
//! existing fields always decrypt under their own stored algorithm
//! regardless of what is configured here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RuneError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Algorithm identifier for new encrypted fields
    /// ("aesgcm" or "no-encryption").
    #[serde(default = "default_encryption")]
    pub encryption: String,

    /// Path of the vault file.
    #[serde(default = "default_secrets_file")]
    pub secrets_file: PathBuf,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_encryption() -> String {
    crate::crypto::AES_GCM.to_string()
}

fn default_secrets_file() -> PathBuf {
    config_dir().join("secrets.json")
}

/// The platform config directory for Rune (created lazily).
fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rune")
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            encryption: default_encryption(),
            secrets_file: default_secrets_file(),
        }
    }
}

impl Settings {
    /// Name of the settings file inside the config directory.
    const FILE_NAME: &'static str = "settings.json";

    /// Path of the settings file itself.
    pub fn path() -> PathBuf {
        config_dir().join(Self::FILE_NAME)
    }

    /// Load settings from the platform config directory.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load settings from an explicit path (used by tests).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;

        serde_json::from_str(&contents).map_err(|e| {
            RuneError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Write the default settings file if none exists yet, then return
    /// the effective settings.  Called once at CLI startup.
    pub fn ensure() -> Result<Self> {
        let path = Self::path();

        if !path.exists() {
            let defaults = Self::default();
            defaults.save_to(&path)?;
            return Ok(defaults);
        }

        Self::load_from(&path)
    }

    /// Persist these settings to the platform config directory.
    /// Used by `rune config` to change them durably.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Persist these settings to an explicit path (used by tests).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RuneError::SerializationError(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.encryption, "aesgcm");
        assert!(s.secrets_file.ends_with("secrets.json"));
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load_from(&tmp.path().join("settings.json")).unwrap();
        assert_eq!(settings.encryption, "aesgcm");
    }

    #[test]
    fn load_parses_json_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        let config = r#"{ "encryption": "no-encryption", "secrets_file": "/tmp/v.json" }"#;
        fs::write(&path, config).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.encryption, "no-encryption");
        assert_eq!(settings.secrets_file, PathBuf::from("/tmp/v.json"));
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, r#"{ "encryption": "no-encryption" }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.encryption, "no-encryption");
        // Rest should be defaults
        assert!(settings.secrets_file.ends_with("secrets.json"));
    }

    #[test]
    fn save_then_load_roundtrips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.json");

        let settings = Settings {
            encryption: "no-encryption".to_string(),
            secrets_file: PathBuf::from("/tmp/other.json"),
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.encryption, "no-encryption");
        assert_eq!(loaded.secrets_file, PathBuf::from("/tmp/other.json"));
    }

    #[test]
    fn save_overwrites_previous_settings() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");

        Settings::default().save_to(&path).unwrap();

        let mut settings = Settings::load_from(&path).unwrap();
        settings.encryption = "no-encryption".to_string();
        settings.save_to(&path).unwrap();

        assert_eq!(
            Settings::load_from(&path).unwrap().encryption,
            "no-encryption"
        );
    }

    #[test]
    fn load_errors_on_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "not valid {{json").unwrap();

        let result = Settings::load_from(&path);
        assert!(result.is_err());
    }
}
