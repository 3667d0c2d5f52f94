//! Lazy-singleton provider factory
//!
//! The factory moves through two states. It starts uninitialized;
//! [`ProviderFactory::initialize`] loads the providers document and
//! moves it to initialized. A failed load leaves it uninitialized, so
//! the call can be retried. Once initialized, each role is resolved on
//! first request and the result is kept for the life of the factory.
//!
//! Every piece of state lives in its own [`OnceCell`]. Concurrent first
//! callers block while a single thread runs the initializer; a failed
//! initializer leaves the cell empty so the next call retries.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use provider_meta::{ConfigurationLoader, FileConfigurationLoader, ProvidersDocument};

use crate::error::{Error, Result};
use crate::extension::ExtensionResolver;
use crate::instantiator::ProviderInstantiator;
use crate::provider::{HookProvider, PersistenceProvider};
use crate::role::ProviderRole;
use crate::settings::FactorySettings;

/// Shared, immutable sequence of hook providers in document order.
pub type HookProviders = Arc<[Arc<dyn HookProvider>]>;

/// Hands out configured provider instances to the host.
pub trait ProviderFactory: Send + Sync {
    /// Load the providers configuration. No-op once initialized.
    fn initialize(&self) -> Result<()>;

    fn is_initialized(&self) -> bool;

    /// The single persistence provider, built and configured on first call.
    fn persistence_provider(&self) -> Result<Arc<dyn PersistenceProvider>>;

    /// All hook providers, built and configured on first call.
    ///
    /// A document without hooks yields an empty sequence.
    fn hook_providers(&self) -> Result<HookProviders>;
}

/// Default [`ProviderFactory`] backed by a configuration loader and an
/// extension resolver.
///
/// Provider constructors and `on_configured` implementations must not
/// call back into the factory for the role being resolved; that call
/// would wait on itself.
pub struct StandardProviderFactory {
    settings: FactorySettings,
    loader: Box<dyn ConfigurationLoader>,
    instantiator: ProviderInstantiator,
    document: OnceCell<ProvidersDocument>,
    persistence: OnceCell<Arc<dyn PersistenceProvider>>,
    hooks: OnceCell<HookProviders>,
}

impl StandardProviderFactory {
    /// Create a factory reading its document from the local filesystem.
    pub fn new(settings: FactorySettings, resolver: Arc<dyn ExtensionResolver>) -> Self {
        Self::with_loader(settings, resolver, FileConfigurationLoader::new())
    }

    /// Create a factory with a custom configuration loader.
    pub fn with_loader(
        settings: FactorySettings,
        resolver: Arc<dyn ExtensionResolver>,
        loader: impl ConfigurationLoader + 'static,
    ) -> Self {
        Self {
            settings,
            loader: Box::new(loader),
            instantiator: ProviderInstantiator::new(resolver),
            document: OnceCell::new(),
            persistence: OnceCell::new(),
            hooks: OnceCell::new(),
        }
    }

    pub fn settings(&self) -> &FactorySettings {
        &self.settings
    }

    /// The loaded providers document.
    pub fn document(&self) -> Result<&ProvidersDocument> {
        self.document.get().ok_or(Error::NotInitialized)
    }
}

impl ProviderFactory for StandardProviderFactory {
    fn initialize(&self) -> Result<()> {
        if self.document.get().is_some() {
            tracing::debug!("Provider factory already initialized");
            return Ok(());
        }

        let path = self.settings.providers_file();
        self.document.get_or_try_init(|| {
            tracing::debug!(path = %path.display(), "Loading providers configuration");
            self.loader.load(path)
        })?;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.document.get().is_some()
    }

    fn persistence_provider(&self) -> Result<Arc<dyn PersistenceProvider>> {
        self.persistence
            .get_or_try_init(|| {
                let entry = self
                    .document()?
                    .persistence_provider
                    .as_ref()
                    .ok_or(Error::RoleMissing {
                        role: ProviderRole::Persistence,
                    })?;
                self.instantiator.instantiate_persistence(entry)
            })
            .map(Arc::clone)
    }

    fn hook_providers(&self) -> Result<HookProviders> {
        self.hooks
            .get_or_try_init(|| {
                let entries = &self.document()?.hook_providers;
                if entries.is_empty() {
                    tracing::debug!("No hook providers configured");
                }
                let hooks = entries
                    .iter()
                    .map(|entry| self.instantiator.instantiate_hook(entry))
                    .collect::<Result<Vec<_>>>()?;
                Ok::<_, Error>(HookProviders::from(hooks))
            })
            .map(Arc::clone)
    }
}

impl fmt::Debug for StandardProviderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardProviderFactory")
            .field("settings", &self.settings)
            .field("initialized", &self.is_initialized())
            .field("persistence_resolved", &self.persistence.get().is_some())
            .field("hooks_resolved", &self.hooks.get().is_some())
            .finish()
    }
}
