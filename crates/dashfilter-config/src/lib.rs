//! Engine configuration for dashfilter, loaded from TOML.
//!
//! Every key is optional; missing keys fall back to [`EngineConfig::default`].

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Name prefix of filters created by the filter-builder widget.
pub const DEFAULT_RESERVED_NAME_PREFIX: &str = "Filter Builder";

/// Separator used between the parts of an ad hoc filter key.
pub const DEFAULT_KEY_SEPARATOR: &str = "-";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// EngineConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Filters whose name starts with this prefix are hidden from
    /// duplicate detection unless a caller asks for all filters.
    pub reserved_name_prefix: String,

    /// Joins database, table, and random suffix in ad hoc keys.
    pub key_separator: String,

    /// Propagate filters to related tables declared by the catalog.
    pub fan_out_relations: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reserved_name_prefix: DEFAULT_RESERVED_NAME_PREFIX.to_string(),
            key_separator: DEFAULT_KEY_SEPARATOR.to_string(),
            fan_out_relations: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse, and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_separator.is_empty() {
            return Err(ConfigError::Invalid(
                "key_separator must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// True when `name` marks a filter owned by the filter-builder widget.
    #[must_use]
    pub fn is_reserved_name(&self, name: &str) -> bool {
        !self.reserved_name_prefix.is_empty() && name.starts_with(&self.reserved_name_prefix)
    }
}
