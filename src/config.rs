//! Guide configuration (YAML).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use guide_geo::MapSurfaceConfig;

use crate::catalog::ConnectionFilter;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "DESTINATION_GUIDE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CONFIG_IO",
            Self::Yaml(_) => "CONFIG_YAML",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuideConfig {
    /// JSON catalog of destinations.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Filter applied at startup.
    #[serde(default)]
    pub default_filter: ConnectionFilter,

    #[serde(default)]
    pub map: MapSurfaceConfig,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            default_filter: ConnectionFilter::default(),
            map: MapSurfaceConfig::default(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/destinations.json")
}

impl GuideConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: GuideConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Resolve the config: explicit path, then `DESTINATION_GUIDE_CONFIG`,
    /// then built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading guide config");
                Self::from_file(path)
            }
            None => {
                tracing::debug!("no guide config given, using defaults");
                Ok(Self::default())
            }
        }
    }
}
