//! Loading and saving of the session configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use super::AppConfig;

pub type SharedConfig = Arc<RwLock<ConfigManager>>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot write config: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Malformed config: {0}")]
    Deserialize(#[from] ron::error::SpannedError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the session configuration and its backing RON file
pub struct ConfigManager {
    config: AppConfig,
    config_path: PathBuf,
    dirty: bool,
}

impl ConfigManager {
    /// Load from the user's config directory, or start from defaults
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("compass-editor")
            .join("config.ron");
        Self::with_path(path)
    }

    /// Load from a specific file; a missing or broken file yields defaults
    pub fn with_path(config_path: PathBuf) -> Self {
        let config = match Self::read(&config_path) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", config_path);
                config
            }
            Err(ConfigError::Io(_)) => {
                tracing::info!("No config at {:?}, using defaults", config_path);
                AppConfig::new()
            }
            Err(e) => {
                tracing::warn!("Ignoring config at {:?}: {}", config_path, e);
                AppConfig::new()
            }
        };

        Self {
            config,
            config_path,
            dirty: false,
        }
    }

    fn read(path: &Path) -> ConfigResult<AppConfig> {
        let content = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&content)?)
    }

    /// Re-read the backing file; on error the current values are kept
    pub fn reload(&mut self) -> ConfigResult<()> {
        self.config = Self::read(&self.config_path)?;
        self.dirty = false;
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Mutable access marks the configuration as unsaved
    pub fn config_mut(&mut self) -> &mut AppConfig {
        self.dirty = true;
        &mut self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending changes; a clean manager does not touch the disk
    pub fn save(&mut self) -> ConfigResult<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let pretty = ron::ser::PrettyConfig::default();
        std::fs::write(&self.config_path, ron::ser::to_string_pretty(&self.config, pretty)?)?;
        tracing::info!("Saved config to {:?}", self.config_path);
        self.dirty = false;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared manager loaded from the user's config directory
pub fn create_shared_config() -> SharedConfig {
    Arc::new(RwLock::new(ConfigManager::new()))
}

/// Shared manager backed by an explicit file
pub fn shared_config_at(path: PathBuf) -> SharedConfig {
    Arc::new(RwLock::new(ConfigManager::with_path(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("compass-editor-{}", uuid::Uuid::new_v4()))
            .join("config.ron")
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let manager = ConfigManager::with_path(scratch_path());
        assert_eq!(manager.config(), &AppConfig::new());
        assert!(!manager.is_dirty());
    }

    #[test]
    fn test_save_and_reload() {
        let path = scratch_path();
        let mut manager = ConfigManager::with_path(path.clone());
        manager.config_mut().validation.min_separation = 12.5;
        manager.config_mut().animation.enabled = false;
        assert!(manager.is_dirty());

        manager.save().unwrap();
        assert!(!manager.is_dirty());

        let reloaded = ConfigManager::with_path(path.clone());
        assert_eq!(reloaded.config().validation.min_separation, 12.5);
        assert!(!reloaded.config().animation.enabled);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_reload_reports_parse_errors() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "(version: ").unwrap();

        let mut manager = ConfigManager::with_path(path.clone());
        assert_eq!(manager.config(), &AppConfig::new());
        assert!(matches!(manager.reload(), Err(ConfigError::Deserialize(_))));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
