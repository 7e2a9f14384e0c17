//! Configuration for cascades and scene loading

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Configuration options for the transform engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Smallest width or height the resize primitive will produce
    pub min_node_size: f64,

    /// `transform_with_container` for scene groups that do not set it
    pub default_transform_with_container: bool,

    /// `is_restrict` for scene groups that do not set it
    pub default_is_restrict: bool,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            min_node_size: 1.0,
            default_transform_with_container: true,
            default_is_restrict: false,
        }
    }
}

impl CascadeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the minimum node size
    pub fn with_min_node_size(mut self, size: f64) -> Self {
        self.min_node_size = size;
        self
    }

    /// Set the default `transform_with_container` flag
    pub fn with_transform_with_container(mut self, enabled: bool) -> Self {
        self.default_transform_with_container = enabled;
        self
    }

    /// Set the default `is_restrict` flag
    pub fn with_restrict(mut self, restrict: bool) -> Self {
        self.default_is_restrict = restrict;
        self
    }
}
