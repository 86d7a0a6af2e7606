//! Configuration system for Lumora
//!
//! User preferences and the storage location, persisted as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError};
use crate::ritual::RitualKind;
use crate::store::FileStore;
use crate::Result;

/// Resolve a path relative to a base directory
/// If the path is absolute, return it as-is
fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Top-level configuration for Lumora
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LumoraConfig {
    #[serde(default)]
    pub user: UserPreferences,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// What the user has opted into
///
/// Camera and voice are off until explicitly enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub enable_camera: bool,
    pub enable_voice: bool,
    pub preferred_rituals: Vec<RitualKind>,

    /// Local hour (0-23) when quiet hours begin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours_start: Option<u8>,

    /// Local hour (0-23) when quiet hours end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours_end: Option<u8>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            enable_camera: false,
            enable_voice: false,
            preferred_rituals: vec![RitualKind::Breathing, RitualKind::Grounding],
            quiet_hours_start: None,
            quiet_hours_end: None,
        }
    }
}

impl UserPreferences {
    /// Whether `hour` falls inside quiet hours; ranges may wrap midnight
    pub fn is_quiet_hour(&self, hour: u8) -> bool {
        match (self.quiet_hours_start, self.quiet_hours_end) {
            (Some(start), Some(end)) if start <= end => hour >= start && hour < end,
            (Some(start), Some(end)) => hour >= start || hour < end,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where mood history lives; defaults to the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// File store rooted at the resolved data directory
    pub fn file_store(&self) -> FileStore {
        FileStore::new(self.resolve_data_dir())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lumora")
}

/// Load configuration from a TOML file
pub async fn load_config(path: &Path) -> Result<LumoraConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CoreError::ConfigurationError {
            config_path: path.display().to_string(),
            field: "file".to_string(),
            expected: "readable TOML file".to_string(),
            cause: ConfigError::Io(e.to_string()),
        })?;

    let mut config: LumoraConfig =
        toml::from_str(&content).map_err(|e| CoreError::ConfigurationError {
            config_path: path.display().to_string(),
            field: "content".to_string(),
            expected: "valid TOML configuration".to_string(),
            cause: ConfigError::TomlParse(e.to_string()),
        })?;

    for (field, hour) in [
        ("user.quiet_hours_start", config.user.quiet_hours_start),
        ("user.quiet_hours_end", config.user.quiet_hours_end),
    ] {
        if hour.is_some_and(|h| h > 23) {
            return Err(CoreError::ConfigurationError {
                config_path: path.display().to_string(),
                field: field.to_string(),
                expected: "an hour between 0 and 23".to_string(),
                cause: ConfigError::TomlParse(format!("{field} out of range")),
            });
        }
    }

    // Relative data directories are relative to the config file
    let base_dir = path.parent().unwrap_or(Path::new("."));
    if let Some(ref data_dir) = config.storage.data_dir {
        config.storage.data_dir = Some(resolve_path(base_dir, data_dir));
    }

    Ok(config)
}

/// Save configuration to a TOML file
pub async fn save_config(config: &LumoraConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CoreError::ConfigurationError {
                config_path: parent.display().to_string(),
                field: "directory".to_string(),
                expected: "writable directory".to_string(),
                cause: ConfigError::Io(e.to_string()),
            })?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| CoreError::ConfigurationError {
        config_path: path.display().to_string(),
        field: "serialization".to_string(),
        expected: "serializable config structure".to_string(),
        cause: ConfigError::TomlSerialize(e.to_string()),
    })?;

    tokio::fs::write(path, content)
        .await
        .map_err(|e| CoreError::ConfigurationError {
            config_path: path.display().to_string(),
            field: "file".to_string(),
            expected: "writable file location".to_string(),
            cause: ConfigError::Io(e.to_string()),
        })?;

    Ok(())
}

/// Standard config file locations
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // Project-specific config
    paths.push(PathBuf::from("lumora.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("lumora").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".lumora").join("config.toml"));
    }

    paths
}

/// Load configuration from standard locations
pub async fn load_config_from_standard_locations() -> Result<LumoraConfig> {
    for path in config_paths() {
        if path.exists() {
            tracing::debug!("loading config from {}", path.display());
            return load_config(&path).await;
        }
    }

    Ok(LumoraConfig::default())
}

impl LumoraConfig {
    /// Load configuration from standard locations
    pub async fn load() -> Result<Self> {
        load_config_from_standard_locations().await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        load_config(path).await
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        save_config(self, path).await
    }

    /// Save to the user config directory, returning where it went
    pub async fn save(&self) -> Result<PathBuf> {
        let config_path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lumora")
            .join("config.toml");

        self.save_to(&config_path).await?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = LumoraConfig::default();
        assert!(!config.user.enable_camera);
        assert!(!config.user.enable_voice);
        assert_eq!(
            config.user.preferred_rituals,
            vec![RitualKind::Breathing, RitualKind::Grounding]
        );
        assert!(config.storage.resolve_data_dir().ends_with("lumora"));
    }

    #[test]
    fn test_config_serialization() {
        let config = LumoraConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[user]"));
        assert!(toml.contains("preferred_rituals"));
        assert!(!toml.contains("quiet_hours_start"));
    }

    #[test]
    fn test_quiet_hours() {
        let mut prefs = UserPreferences::default();
        assert!(!prefs.is_quiet_hour(23));

        prefs.quiet_hours_start = Some(22);
        prefs.quiet_hours_end = Some(7);
        assert!(prefs.is_quiet_hour(23));
        assert!(prefs.is_quiet_hour(3));
        assert!(!prefs.is_quiet_hour(7));
        assert!(!prefs.is_quiet_hour(12));

        prefs.quiet_hours_start = Some(13);
        prefs.quiet_hours_end = Some(15);
        assert!(prefs.is_quiet_hour(14));
        assert!(!prefs.is_quiet_hour(15));
    }

    #[tokio::test]
    async fn test_save_and_load_resolves_relative_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lumora.toml");

        let mut config = LumoraConfig::default();
        config.user.enable_voice = true;
        config.user.quiet_hours_start = Some(22);
        config.user.quiet_hours_end = Some(6);
        config.storage.data_dir = Some(PathBuf::from("history"));

        config.save_to(&path).await.unwrap();
        let loaded = LumoraConfig::load_from(&path).await.unwrap();

        assert!(loaded.user.enable_voice);
        assert_eq!(loaded.user.quiet_hours_start, Some(22));
        assert_eq!(
            loaded.storage.resolve_data_dir(),
            dir.path().join("nested").join("history")
        );
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumora.toml");
        tokio::fs::write(&path, "[user]\nenable_camera = true\n")
            .await
            .unwrap();

        let loaded = load_config(&path).await.unwrap();
        assert!(loaded.user.enable_camera);
        assert_eq!(
            loaded.user.preferred_rituals,
            UserPreferences::default().preferred_rituals
        );
        assert_eq!(loaded.storage, StorageConfig::default());
    }

    #[tokio::test]
    async fn test_bad_config_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumora.toml");

        tokio::fs::write(&path, "[user\n").await.unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::ConfigurationError {
                cause: ConfigError::TomlParse(_),
                ..
            }
        ));

        tokio::fs::write(&path, "[user]\nquiet_hours_end = 30\n")
            .await
            .unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::ConfigurationError { ref field, .. } if field == "user.quiet_hours_end"
        ));

        let missing = load_config(&dir.path().join("absent.toml")).await.unwrap_err();
        assert!(matches!(
            missing,
            CoreError::ConfigurationError {
                cause: ConfigError::Io(_),
                ..
            }
        ));
    }
}
