//! Factory settings
//!
//! Tells the factory where its providers configuration document lives.
//! Settings can be built in code or read from a small settings file in
//! any supported document format:
//!
//! ```toml
//! providers_file = "providers.toml"
//! ```

use std::path::{Path, PathBuf};

use provider_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default location of the providers configuration document.
pub const DEFAULT_PROVIDERS_FILE: &str = "conf/providers.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactorySettings {
    /// Path to the providers configuration document
    #[serde(default = "default_providers_file")]
    pub providers_file: PathBuf,
}

fn default_providers_file() -> PathBuf {
    PathBuf::from(DEFAULT_PROVIDERS_FILE)
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            providers_file: default_providers_file(),
        }
    }
}

impl FactorySettings {
    pub fn new(providers_file: impl Into<PathBuf>) -> Self {
        Self {
            providers_file: providers_file.into(),
        }
    }

    /// Read settings from a file.
    ///
    /// A relative `providers_file` is resolved against the directory
    /// containing the settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut settings: Self = ConfigStore::new()
            .load(path)
            .map_err(|source| Error::Settings {
                path: path.to_path_buf(),
                source,
            })?;

        if settings.providers_file.is_relative() {
            if let Some(dir) = path.parent() {
                settings.providers_file = dir.join(&settings.providers_file);
            }
        }

        tracing::debug!(
            settings = %path.display(),
            providers_file = %settings.providers_file.display(),
            "Loaded factory settings"
        );
        Ok(settings)
    }

    pub fn providers_file(&self) -> &Path {
        &self.providers_file
    }
}
