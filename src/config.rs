use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::acquire::DownloadOptions;
use crate::exif::WriteOptions;

/// Top-level configuration for exif-edit.
///
/// # Loading
///
/// ```rust,no_run
/// use exif_edit::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.output.jpeg_quality = 85;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP settings for `--url` downloads.
    pub network: NetworkConfig,
    /// How modified images are saved and shown.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JPEG quality (1-100) for re-encoded images.
    pub jpeg_quality: u8,
    /// ANSI colors in the metadata table.
    pub color: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 95,
            color: true,
        }
    }
}

impl Config {
    /// `config.json` in the executable's directory.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(config_path)
    }

    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            user_agent: self.network.user_agent.clone(),
            timeout: Duration::from_secs(self.network.timeout_secs.max(1)),
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            jpeg_quality: self.output.jpeg_quality.clamp(1, 100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(dir.path().join("none.json").as_path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.network.timeout_secs = 30;
        config.output.color = false;

        assert_eq!(config.save(Some(path.as_path())).unwrap(), path);
        assert_eq!(Config::load(Some(path.as_path())).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "output": { "jpeg_quality": 70 } }"#).unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.output.jpeg_quality, 70);
        assert!(config.output.color);
        assert_eq!(config.network, NetworkConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn options_are_clamped() {
        let mut config = Config::default();
        config.output.jpeg_quality = 0;
        config.network.timeout_secs = 0;
        assert_eq!(config.write_options().jpeg_quality, 1);
        assert_eq!(config.download_options().timeout, Duration::from_secs(1));
        assert_eq!(config.download_options().user_agent, "Mozilla/5.0");
    }
}
