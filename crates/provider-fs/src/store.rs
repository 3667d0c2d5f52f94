//! Format-agnostic configuration loading

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{DocumentFormat, Error, Result, io};

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and parses the content
/// into either a format-neutral [`serde_json::Value`] tree or a typed
/// value.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a document as a format-neutral tree.
    ///
    /// The tree is what schema validation runs against, so every
    /// supported format is normalized to the same JSON data model.
    pub fn load_value(&self, path: &Path) -> Result<serde_json::Value> {
        let content = io::read_text(path)?;
        let format = DocumentFormat::from_path(path)?;
        tracing::debug!(path = %path.display(), %format, "Parsing document");
        parse_str(&content, format).map_err(|message| Error::Parse {
            path: path.to_path_buf(),
            format: format.to_string(),
            message,
        })
    }

    /// Load a document directly into a typed value.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let format = DocumentFormat::from_path(path)?;
        let value = self.load_value(path)?;
        serde_json::from_value(value).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            format: format.to_string(),
            message: e.to_string(),
        })
    }
}

fn parse_str(content: &str, format: DocumentFormat) -> std::result::Result<serde_json::Value, String> {
    match format {
        DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        // An empty YAML file parses to null; treat it as an empty mapping
        // so it behaves like an empty TOML file.
        DocumentFormat::Yaml if content.trim().is_empty() => {
            Ok(serde_json::Value::Object(serde_json::Map::new()))
        }
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    }
}
