use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use which::which;

/// Distribution that owns the plx environment; its requirements are core dependencies.
pub const DEFAULT_HOST_PACKAGE: &str = "plx-core";

/// Name of the plugin tracking file inside the data directory
pub const TRACKING_FILE_NAME: &str = "plugins.toml";

const CONFIG_ENV: &str = "PLX_CONFIG";
const DATA_DIR_ENV: &str = "PLX_DATA_DIR";

/// Supported configuration keys, in display order
pub const CONFIG_KEYS: [&str; 4] = ["uv-path", "venv-path", "data-dir", "host-package"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("uv is not installed. Please install it from: https://docs.astral.sh/uv/getting-started/installation/")]
    UvNotFound,

    #[error("Unknown config key: {0}. Supported keys: uv-path, venv-path, data-dir, host-package")]
    UnknownKey(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venv_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_package: Option<String>,
}

impl Config {
    /// Path of the config file. `PLX_CONFIG` overrides the default location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = non_empty_env(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join(".config");

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir().ok_or(ConfigError::NoHomeDir)?;

        Ok(base.join("plx").join("plx.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path()?)
    }

    /// Load config from a specific path, returning defaults if the file doesn't exist
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(&Self::path()?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "uv-path" => self.uv_path.clone(),
            "venv-path" => self.venv_path.clone(),
            "data-dir" => self.data_dir.clone(),
            "host-package" => self.host_package.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "uv-path" => self.uv_path = Some(value),
            "venv-path" => self.venv_path = Some(value),
            "data-dir" => self.data_dir = Some(value),
            "host-package" => self.host_package = Some(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        CONFIG_KEYS.iter().all(|key| self.get(key).is_none())
    }

    pub fn values_iter(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    /// Directory holding plx state (tracking file, default venv).
    ///
    /// Precedence: `PLX_DATA_DIR`, then `data-dir`, then the platform data dir.
    pub fn get_data_dir(&self) -> PathBuf {
        if let Some(path) = non_empty_env(DATA_DIR_ENV) {
            return PathBuf::from(path);
        }
        if let Some(ref path) = self.data_dir {
            return PathBuf::from(path);
        }
        dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .map_or_else(|| PathBuf::from(".plx"), |d| d.join("plx"))
    }

    pub fn tracking_file_path(&self) -> PathBuf {
        self.get_data_dir().join(TRACKING_FILE_NAME)
    }

    pub fn get_venv_path(&self) -> PathBuf {
        self.venv_path
            .as_ref()
            .map_or_else(|| self.get_data_dir().join("venv"), PathBuf::from)
    }

    pub fn host_package(&self) -> &str {
        self.host_package.as_deref().unwrap_or(DEFAULT_HOST_PACKAGE)
    }

    /// Return the configured uv binary, falling back to `uv` on PATH.
    ///
    /// A stale configured path is dropped and the discovered one is stored.
    pub fn ensure_uv_path(&mut self) -> Result<String, ConfigError> {
        if let Some(ref path) = self.uv_path {
            if Path::new(path).exists() {
                return Ok(path.clone());
            }
            self.uv_path = None;
        }

        let path = which("uv").map_err(|_| ConfigError::UvNotFound)?;
        let path_str = path.to_string_lossy().trim().to_string();
        self.uv_path = Some(path_str.clone());
        Ok(path_str)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::default();
        assert!(config.is_empty());
        assert_eq!(config.host_package(), DEFAULT_HOST_PACKAGE);
    }

    #[test]
    fn test_config_set_get() {
        let mut config = Config::default();
        assert!(config.set("host-package", "my-tool".to_string()).is_ok());
        assert_eq!(config.get("host-package"), Some("my-tool".to_string()));
        assert_eq!(config.host_package(), "my-tool");
        assert!(!config.is_empty());
    }

    #[test]
    fn test_config_unknown_key() {
        let mut config = Config::default();
        let result = config.set("unknown-key", "value".to_string());
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
        assert_eq!(config.get("unknown-key"), None);
    }

    #[test]
    fn test_values_iter_follows_key_order() {
        let mut config = Config::default();
        assert!(config.set("data-dir", "/tmp/plx".to_string()).is_ok());
        assert!(config.set("uv-path", "/usr/bin/uv".to_string()).is_ok());

        let keys: Vec<&str> = config.values_iter().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["uv-path", "data-dir"]);
    }

    #[test]
    fn test_venv_path_explicit() {
        let config = Config {
            venv_path: Some("/opt/plx/venv".to_string()),
            ..Default::default()
        };
        assert_eq!(config.get_venv_path(), PathBuf::from("/opt/plx/venv"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("nested").join("plx.toml");

        let config = Config {
            venv_path: Some("/opt/plx/venv".to_string()),
            host_package: Some("my-tool".to_string()),
            ..Default::default()
        };
        assert!(config.save_to_path(&path).is_ok());

        let content = fs::read_to_string(&path).unwrap_or_default();
        assert!(content.contains("host-package = \"my-tool\""));

        let loaded = Config::load_from_path(&path);
        assert!(loaded.is_ok_and(|c| c == config));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let loaded = Config::load_from_path(&temp_dir.path().join("missing.toml"));
        assert!(loaded.is_ok_and(|c| c.is_empty()));
    }
}
