//! In-memory extension registry
//!
//! The default [`ExtensionResolver`]: hosts register each provider
//! implementation under the identifier that configuration documents
//! use to select it.

use std::collections::HashMap;

use crate::extension::{Extension, ExtensionResolver};
use crate::provider::{BoxError, HookProvider, PersistenceProvider};

/// Registry of known extensions keyed by identifier.
///
/// # Example
///
/// ```
/// use provider_core::{ExtensionRegistry, ExtensionResolver};
///
/// let registry = ExtensionRegistry::new();
/// assert!(registry.resolve("fs.Persistence").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    entries: HashMap<String, Extension>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register an extension.
    ///
    /// If the identifier was already registered, the previous extension
    /// is replaced.
    pub fn register(&mut self, extension: Extension) {
        if self.entries.contains_key(extension.identifier()) {
            tracing::debug!(extension = extension.identifier(), "Replacing registered extension");
        }
        self.entries
            .insert(extension.identifier().to_string(), extension);
    }

    /// Register a [`PersistenceProvider`] implementation.
    pub fn register_persistence<P, F>(
        &mut self,
        identifier: impl Into<String>,
        description: impl Into<String>,
        factory: F,
    ) where
        P: PersistenceProvider,
        F: Fn() -> Result<P, BoxError> + Send + Sync + 'static,
    {
        self.register(Extension::persistence(identifier, description, factory));
    }

    /// Register a [`HookProvider`] implementation.
    pub fn register_hook<H, F>(
        &mut self,
        identifier: impl Into<String>,
        description: impl Into<String>,
        factory: F,
    ) where
        H: HookProvider,
        F: Fn() -> Result<H, BoxError> + Send + Sync + 'static,
    {
        self.register(Extension::hook(identifier, description, factory));
    }

    pub fn get(&self, identifier: &str) -> Option<&Extension> {
        self.entries.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// All registered identifiers, sorted.
    pub fn known_extensions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExtensionResolver for ExtensionRegistry {
    fn resolve(&self, identifier: &str) -> Option<Extension> {
        self.get(identifier).cloned()
    }
}
