//! JSON configuration adapter

use wheelhouse_core::config::{ConfigDocument, ConfigLoader};
use wheelhouse_core::error::{Error, Result};

/// JSON configuration adapter
///
/// The canonical raw-text form: pretty-printed JSON with stable key
/// order (struct declaration order) and two-space indentation.
pub struct JsonAdapter;

impl JsonAdapter {
    /// Parse JSON configuration
    pub fn parse(input: &str) -> Result<ConfigDocument> {
        ConfigLoader::from_json(input)
    }

    /// Serialize configuration to canonical JSON
    pub fn serialize(document: &ConfigDocument) -> Result<String> {
        serde_json::to_string_pretty(document).map_err(|e| Error::Config(e.to_string()))
    }
}
