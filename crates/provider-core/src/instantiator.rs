//! Builds and configures one provider from one configuration entry

use std::sync::Arc;

use provider_meta::ProviderEntry;

use crate::context::ProviderConfigurationContext;
use crate::error::{CreationError, Error, Result};
use crate::extension::{Constructor, ExtensionConstructor, ExtensionResolver};
use crate::provider::{HookProvider, PersistenceProvider, Provider};
use crate::role::ProviderRole;

/// Resolves, constructs and configures providers.
///
/// Every failure is reported as [`Error::ProviderCreation`] naming the
/// role and extension identifier, with the underlying cause attached.
#[derive(Clone)]
pub struct ProviderInstantiator {
    resolver: Arc<dyn ExtensionResolver>,
}

impl ProviderInstantiator {
    pub fn new(resolver: Arc<dyn ExtensionResolver>) -> Self {
        Self { resolver }
    }

    pub fn instantiate_persistence(&self, entry: &ProviderEntry) -> Result<Arc<dyn PersistenceProvider>> {
        self.instantiate(ProviderRole::Persistence, entry, ExtensionConstructor::as_persistence)
    }

    pub fn instantiate_hook(&self, entry: &ProviderEntry) -> Result<Arc<dyn HookProvider>> {
        self.instantiate(ProviderRole::Hook, entry, ExtensionConstructor::as_hook)
    }

    fn instantiate<T, S>(&self, role: ProviderRole, entry: &ProviderEntry, select: S) -> Result<Arc<T>>
    where
        T: Provider + ?Sized,
        S: FnOnce(&ExtensionConstructor) -> Option<&Constructor<T>>,
    {
        let extension = entry.extension.as_str();
        let failed = |source: CreationError| Error::ProviderCreation {
            role,
            extension: extension.to_string(),
            source,
        };

        let resolved = self
            .resolver
            .resolve(extension)
            .ok_or_else(|| failed(CreationError::ExtensionNotFound))?;

        let constructor = select(resolved.constructor()).ok_or_else(|| {
            failed(CreationError::InstantiationFailed(
                format!("extension is a {} and does not implement {role}", resolved.role()).into(),
            ))
        })?;

        let mut provider =
            constructor().map_err(|e| failed(CreationError::InstantiationFailed(e)))?;
        tracing::info!(%role, extension, "Instantiated provider");

        let context = ProviderConfigurationContext::from_properties(&entry.properties);
        provider
            .on_configured(&context)
            .map_err(|e| failed(CreationError::ConfigurationRejected(e)))?;
        tracing::info!(%role, extension, properties = context.len(), "Configured provider");

        Ok(Arc::from(provider))
    }
}

impl std::fmt::Debug for ProviderInstantiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderInstantiator").finish_non_exhaustive()
    }
}
