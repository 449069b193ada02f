//! Director configuration: the static values the stub path planner serves.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Values returned by the director for every request.
///
/// Every field has a default, so a RON file only needs the fields it
/// changes. Unknown fields are rejected to catch typos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectorConfig {
    pub next_node: String,
    pub content_variant: String,
    pub dialogue: String,
    pub dominant_emotion: String,
    /// Not range-checked.
    pub confidence: f64,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            next_node: "start".to_string(),
            content_variant: "default".to_string(),
            dialogue: "Welcome".to_string(),
            dominant_emotion: "engaged".to_string(),
            confidence: 0.85,
        }
    }
}

impl DirectorConfig {
    /// Parse a configuration from a RON string.
    pub fn parse_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Load a configuration from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}
