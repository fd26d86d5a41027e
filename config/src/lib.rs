//! Configuration loading for Tandem.
//!
//! ```toml
//! [orchestration]
//! default_deadline_ms = 5000
//!
//! [network]
//! force_offline = false
//! ```
//!
//! The file is optional. Values that other crates consult (the offline
//! toggle in particular) are handed to operations explicitly instead of
//! living in shared mutable state.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use thiserror::Error;

#[derive(Debug, Default, Deserialize)]
pub struct TandemConfig {
    pub orchestration: Option<OrchestrationConfig>,
    pub network: Option<NetworkConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrchestrationConfig {
    /// Deadline applied to a step that does not declare its own.
    pub default_deadline_ms: Option<u64>,
}

impl OrchestrationConfig {
    #[must_use]
    pub fn default_deadline(&self) -> Option<Duration> {
        self.default_deadline_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Treat the device as offline even when the network reports a connection.
    #[serde(default)]
    pub force_offline: bool,
}

impl NetworkConfig {
    #[must_use]
    pub const fn is_online(self, network_reports_online: bool) -> bool {
        !self.force_offline && network_reports_online
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl TandemConfig {
    /// Loads `~/.tandem/config.toml`. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::from_path(&path).map(Some)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn default_deadline(&self) -> Option<Duration> {
        self.orchestration
            .as_ref()
            .and_then(OrchestrationConfig::default_deadline)
    }

    #[must_use]
    pub fn network(&self) -> NetworkConfig {
        self.network.unwrap_or_default()
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tandem").join("config.toml"))
}
