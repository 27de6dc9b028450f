use std::fs;
use std::path::Path;

use serde::{ Deserialize, Serialize };
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Options shared by all asserters
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AsserterConfig {
    /// Repeat the equality walk with the absent value for nullable properties
    pub check_null_values: bool,

    /// Property names skipped by every assertion, on top of per-call exclusions
    pub excluded_properties: Vec<String>,
}

impl AsserterConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AsserterConfig = serde_yaml::from_str(contents)?;
        log::debug!(
            "Loaded asserter config: check_null_values={}, {} excluded properties",
            config.check_null_values,
            config.excluded_properties.len()
        );
        Ok(config)
    }
}

impl Default for AsserterConfig {
    fn default() -> Self {
        AsserterConfig {
            check_null_values: true,
            excluded_properties: Vec::new(),
        }
    }
}
