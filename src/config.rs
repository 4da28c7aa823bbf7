//! Config loading and persistence.
//!
//! Configuration is project-local: `.coordmap/config.toml` next to the
//! manifest. A missing config means defaults; an unreadable one logs a
//! warning and falls back to defaults rather than blocking the CLI.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Run the validator inside every `mutate` (disable for bulk imports).
    pub validate_on_mutate: bool,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            validate_on_mutate: true,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub stdout_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load the config at `path`, falling back to defaults when the file is
/// absent or unreadable.
pub fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match load(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("config load failed, using defaults: {e}");
            Config::default()
        }
    }
}

pub fn write_config(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    let write_error = |reason: String| ConfigError::Write {
        path: path.to_path_buf(),
        reason,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| write_error("config path missing parent directory".to_string()))?;
    fs::create_dir_all(dir).map_err(|e| write_error(format!("failed to create {}: {e}", dir.display())))?;
    let contents = toml::to_string_pretty(cfg)
        .map_err(|e| write_error(format!("failed to render config: {e}")))?;
    let temp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| write_error(format!("failed to create temp file in {}: {e}", dir.display())))?;
    fs::write(temp.path(), contents.as_bytes())
        .map_err(|e| write_error(format!("failed to write config temp file: {e}")))?;
    temp.persist(path)
        .map_err(|e| write_error(format!("failed to persist config to {}: {e}", path.display())))?;
    Ok(())
}
