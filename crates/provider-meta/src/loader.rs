//! Loader for providers configuration documents
//!
//! Loading happens in three strictly ordered steps:
//!
//! 1. read and parse the file into a format-neutral tree
//! 2. validate the whole tree against the fixed schema
//! 3. deserialize the tree into a [`ProvidersDocument`]
//!
//! Nothing is interpreted until step 2 has passed. A document that is
//! schema-valid but declares no persistence provider is accepted here;
//! that gap is reported when the provider is requested.

use std::path::Path;

use provider_fs::ConfigStore;

use crate::{Error, ProvidersDocument, Result, schema};

/// Source of providers configuration documents.
///
/// The factory only depends on this trait, so hosts and tests can
/// substitute their own loading strategy.
pub trait ConfigurationLoader: Send + Sync {
    /// Load and validate the document at `path`.
    fn load(&self, path: &Path) -> Result<ProvidersDocument>;
}

/// Loads providers documents from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileConfigurationLoader {
    store: ConfigStore,
}

impl FileConfigurationLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigurationLoader for FileConfigurationLoader {
    fn load(&self, path: &Path) -> Result<ProvidersDocument> {
        let tree = self
            .store
            .load_value(path)
            .map_err(|e| Error::from_fs(path, e))?;

        schema::validate(path, &tree)?;

        let document: ProvidersDocument =
            serde_json::from_value(tree).map_err(|e| Error::InvalidConfig {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        tracing::info!(
            path = %path.display(),
            persistence = document.persistence_provider.is_some(),
            hooks = document.hook_providers.len(),
            "Loaded providers configuration"
        );

        Ok(document)
    }
}

impl<L: ConfigurationLoader + ?Sized> ConfigurationLoader for std::sync::Arc<L> {
    fn load(&self, path: &Path) -> Result<ProvidersDocument> {
        (**self).load(path)
    }
}
