//! Configuration loader

use crate::config::ConfigDocument;
use crate::error::{Error, Result};
use std::path::Path;

/// Configuration loader for various formats
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a configuration document from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ConfigDocument> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            _ => Err(Error::Config(format!("Unknown config format: {}", ext))),
        }
    }

    /// Parse JSON configuration
    pub fn from_json(content: &str) -> Result<ConfigDocument> {
        serde_json::from_str(content).map_err(|e| Error::Parse(format!("Invalid JSON: {}", e)))
    }

    /// Parse TOML configuration
    pub fn from_toml(content: &str) -> Result<ConfigDocument> {
        toml::from_str(content).map_err(|e| Error::Parse(format!("Invalid TOML: {}", e)))
    }
}
