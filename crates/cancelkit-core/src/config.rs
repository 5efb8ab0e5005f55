use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CancelkitConfig {
    pub version: u32,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub experiments: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Features {
    #[serde(default = "enabled")]
    pub removal_survey: bool,
    #[serde(default)]
    pub precancellation_chat: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            removal_survey: true,
            precancellation_chat: false,
        }
    }
}

fn enabled() -> bool {
    true
}

impl Default for CancelkitConfig {
    fn default() -> Self {
        Self {
            version: 1,
            features: Features::default(),
            experiments: BTreeMap::new(),
        }
    }
}

/// Experiment buckets pinned by configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticExperiments {
    assignments: BTreeMap<String, String>,
}

impl StaticExperiments {
    pub fn new(assignments: BTreeMap<String, String>) -> Self {
        Self { assignments }
    }

    pub fn from_config(config: &CancelkitConfig) -> Self {
        Self::new(config.experiments.clone())
    }

    pub fn variant(&self, name: &str) -> Option<&str> {
        self.assignments.get(name).map(String::as_str)
    }

    pub fn assignments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|(name, variant)| (name.as_str(), variant.as_str()))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve home directory for config path")]
    HomeDirectoryUnavailable,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs
        .home_dir()
        .join(".config")
        .join("cancelkit")
        .join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<CancelkitConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: CancelkitConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

pub fn validate_config(config: &CancelkitConfig) -> Result<(), ConfigError> {
    if config.version != 1 {
        return Err(ConfigError::Validation {
            message: "version must be 1".to_string(),
        });
    }

    for (name, variant) in &config.experiments {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "experiment names must be non-empty".to_string(),
            });
        }
        if variant.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: format!("experiment '{name}' must name a non-empty variant"),
            });
        }
    }

    Ok(())
}
