//! Client configuration.
//!
//! Loaded from a JSON file; every field has a default so a partial file (or
//! none at all) is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default UDP announce port
pub const DEFAULT_BROADCAST_PORT: u16 = 3333;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub upload: UploadConfig,
    pub broadcast: BroadcastConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadConfig {
    /// Collector endpoint; uploads need it from here or the command line.
    pub url: Option<String>,
    pub compress: bool,
    pub ignore_file_open_error: bool,
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            url: None,
            compress: true,
            ignore_file_open_error: true,
            timeout_secs: 60,
        }
    }
}

impl UploadConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BroadcastConfig {
    /// Source address; its port is the destination port.
    pub address: String,
    pub timeout_secs: u64,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            address: format!("0.0.0.0:{}", DEFAULT_BROADCAST_PORT),
            timeout_secs: 2,
        }
    }
}

impl BroadcastConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ClientConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the platform config file if it exists,
    /// else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upload.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upload.timeoutSecs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.broadcast.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "broadcast.timeoutSecs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.broadcast.address.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "broadcast.address".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Platform-specific config file location.
///
/// Uses the `directories` crate to find the config directory.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "wanted", "wanted")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (PathBuf, TempDir) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        (path, tmp)
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(config.upload.url.is_none());
        assert!(config.upload.compress);
        assert!(config.upload.ignore_file_open_error);
        assert_eq!(config.upload.timeout(), Duration::from_secs(60));
        assert_eq!(config.broadcast.address, "0.0.0.0:3333");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let (path, _tmp) = write_config(
            r#"{ "upload": { "url": "https://collector.example.com/upload", "compress": false } }"#,
        );

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(
            config.upload.url.as_deref(),
            Some("https://collector.example.com/upload")
        );
        assert!(!config.upload.compress);
        assert!(config.upload.ignore_file_open_error);
        assert_eq!(config.broadcast, BroadcastConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let (path, _tmp) = write_config("{ not json");
        assert!(matches!(
            ClientConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let (path, _tmp) = write_config(r#"{ "broadcast": { "timeoutSecs": 0 } }"#);
        assert!(matches!(
            ClientConfig::load(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.json");
        assert!(matches!(
            ClientConfig::load_or_default(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_serialization_round_trip_field_names() {
        let json = serde_json::to_string(&ClientConfig::default()).unwrap();
        assert!(json.contains("ignoreFileOpenError"));
        assert!(json.contains("timeoutSecs"));
    }
}
