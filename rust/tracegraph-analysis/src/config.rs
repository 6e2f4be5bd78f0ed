//! Configuration file parsing for `tracegraph.toml`.
//!
//! Searches the current directory then its ancestors.  The
//! `TRACEGRAPH_CONFIG` environment variable names an explicit file and wins
//! over the search.  Missing files mean defaults.
//!
//! ```toml
//! [critical-path]
//! algorithm = "bounded"
//! max_resolution_depth = 1024
//! ```

use crate::algorithm::AlgorithmKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "tracegraph.toml";
pub const CONFIG_ENV_VAR: &str = "TRACEGRAPH_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid toml in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid toml: {0}")]
    Syntax(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TraceGraphConfig {
    #[serde(default, rename = "critical-path")]
    pub critical_path: CriticalPathConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalPathConfig {
    /// Algorithm used when the caller does not pick one.
    pub algorithm: AlgorithmKind,
    /// How many blocking intervals may be resolved inside one another before
    /// the computation is aborted.
    pub max_resolution_depth: usize,
}

impl Default for CriticalPathConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::Bounded,
            max_resolution_depth: 1024,
        }
    }
}

impl TraceGraphConfig {
    /// Load the discovered configuration, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::load_with_path()?
            .map(|(_path, cfg)| cfg)
            .unwrap_or_default())
    }

    /// Load the discovered configuration and report where it came from.
    pub fn load_with_path() -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let Some(path) = Self::discover() else {
            return Ok(None);
        };
        let cfg = Self::load_from(&path)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(Some((path, cfg)))
    }

    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a TOML string directly.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.critical_path.max_resolution_depth == 0 {
            return Err(ConfigError::Invalid(
                "critical-path.max_resolution_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn discover() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(explicit));
        }
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }
}
