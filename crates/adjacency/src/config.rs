use crate::{
    batch::CheckKind,
    constants::{DEFAULT_MAX_SHOW, TABLE_EXTENSION},
    error::{AdjacencyError, Result},
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by the verifier binaries
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub verify: VerifyConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyConfig {
    /// list individual mismatches, not only their counts
    #[serde(default)]
    pub show_mismatches: bool,
    #[serde(default = "default_max_show")]
    pub max_show: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub check: CheckKind,
    /// file extension without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_max_show() -> usize {
    DEFAULT_MAX_SHOW
}

fn default_extension() -> String {
    TABLE_EXTENSION.to_string()
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            show_mismatches: false,
            max_show: DEFAULT_MAX_SHOW,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            check: CheckKind::default(),
            extension: default_extension(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AdjacencyError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            AdjacencyError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            warn!(
                "Config file not found: {}, using default settings",
                path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.verify.max_show == 0 {
            return Err(AdjacencyError::Config(
                "verify.max_show must be at least 1".to_string(),
            ));
        }

        let ext = &self.batch.extension;
        if ext.is_empty() || ext.starts_with('.') {
            return Err(AdjacencyError::Config(format!(
                "batch.extension must be non-empty and without a leading dot, got '{ext}'"
            )));
        }

        Ok(())
    }
}
