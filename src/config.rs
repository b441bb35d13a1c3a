// Configuration loading and parsing (tiers.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::sleeper::SLEEPER_API_BASE;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "tiers.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Application configuration. Every field has a default so the binary runs
/// without a config file present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sleeper: SleeperConfig,
    pub extract: ExtractConfig,
}

/// The `[sleeper]` section: id lookup collaborator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SleeperConfig {
    pub base_url: String,
    /// When false, extraction runs without attaching player ids.
    pub lookup_enabled: bool,
    pub timeout_secs: u64,
}

impl Default for SleeperConfig {
    fn default() -> Self {
        Self {
            base_url: SLEEPER_API_BASE.to_string(),
            lookup_enabled: false,
            timeout_secs: 10,
        }
    }
}

/// The `[extract]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Directory uploaded sheets are staged in.
    pub uploads_dir: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            uploads_dir: "./uploads".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from `tiers.toml` in the working directory. A
/// missing file yields built-in defaults; a present but malformed file is
/// an error.
pub fn load_config() -> Result<Config, ConfigError> {
    load_from_path(Path::new(CONFIG_FILE))
}

/// Load configuration from an explicit path. Exposed for testing.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.sleeper.base_url.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "sleeper.base_url".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if config.sleeper.timeout_secs == 0 {
        return Err(ConfigError::Validation {
            field: "sleeper.timeout_secs".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Defaults --

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.sleeper.base_url, SLEEPER_API_BASE);
        assert!(!config.sleeper.lookup_enabled);
        assert_eq!(config.sleeper.timeout_secs, 10);
        assert_eq!(config.extract.uploads_dir, "./uploads");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_from_path(Path::new("no-such-config.toml")).unwrap();
        assert_eq!(config.sleeper.base_url, SLEEPER_API_BASE);
    }

    // -- Partial files keep defaults for omitted fields --

    #[test]
    fn partial_file_fills_defaults() {
        let raw = "\
[sleeper]
lookup_enabled = true";
        let config: Config = toml::from_str(raw).unwrap();
        assert!(config.sleeper.lookup_enabled);
        assert_eq!(config.sleeper.base_url, SLEEPER_API_BASE);
        assert_eq!(config.extract.uploads_dir, "./uploads");
    }

    // -- Validation --

    #[test]
    fn empty_base_url_rejected() {
        let raw = "\
[sleeper]
base_url = \"  \"";
        let config: Config = toml::from_str(raw).unwrap();
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "sleeper.base_url"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let raw = "\
[sleeper]
timeout_secs = 0";
        let config: Config = toml::from_str(raw).unwrap();
        assert!(validate(&config).is_err());
    }
}
