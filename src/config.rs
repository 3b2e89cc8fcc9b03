//! Host collection settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default sampling interval in seconds.
pub const DEFAULT_INTERVAL_SECS: u32 = 15;

/// Default root of the proc filesystem.
pub const DEFAULT_PROC_PATH: &str = "/proc";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("interval must be at least one second")]
    ZeroInterval,

    #[error("proc path must not be empty")]
    EmptyProcPath,

    #[error("cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings of the host collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Sampling interval in seconds; also the divisor of CPU percentages.
    pub interval_secs: u32,
    /// Root of the proc filesystem.
    pub proc_path: PathBuf,
    /// `df`-formatted file to read instead of running `df`.
    pub disk_path: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            proc_path: PathBuf::from(DEFAULT_PROC_PATH),
            disk_path: None,
        }
    }
}

impl HostConfig {
    /// Loads settings from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: HostConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.proc_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyProcPath);
        }
        Ok(())
    }
}
