//! Provider resolution and configuration engine.
//!
//! Turns a providers configuration document into configured provider
//! instances. The host defines the role contracts ([`PersistenceProvider`],
//! [`HookProvider`]) and registers implementations with an
//! [`ExtensionResolver`]; the [`StandardProviderFactory`] loads the
//! document once and lazily builds and caches one set of instances per
//! role.
//!
//! ```no_run
//! use std::sync::Arc;
//! use provider_core::{ExtensionRegistry, FactorySettings, ProviderFactory, StandardProviderFactory};
//!
//! # fn main() -> provider_core::Result<()> {
//! let registry = ExtensionRegistry::new();
//! // registry.register_persistence("fs.Persistence", "...", || Ok(FsPersistence::default()));
//! let factory = StandardProviderFactory::new(
//!     FactorySettings::new("conf/providers.toml"),
//!     Arc::new(registry),
//! );
//! factory.initialize()?;
//! let persistence = factory.persistence_provider()?;
//! let hooks = factory.hook_providers()?;
//! # let _ = (persistence, hooks);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod extension;
pub mod factory;
pub mod instantiator;
pub mod logging;
pub mod provider;
pub mod registry;
pub mod role;
pub mod settings;

pub use context::ProviderConfigurationContext;
pub use error::{CreationError, Error, ErrorKind, Result};
pub use extension::{Constructor, Extension, ExtensionConstructor, ExtensionResolver};
pub use factory::{HookProviders, ProviderFactory, StandardProviderFactory};
pub use instantiator::ProviderInstantiator;
pub use provider::{BoxError, HookEvent, HookProvider, PersistenceProvider, Provider, ProviderError};
pub use registry::ExtensionRegistry;
pub use role::ProviderRole;
pub use settings::FactorySettings;

pub use provider_meta::{Property, ProviderEntry, ProvidersDocument};
