//! Extension resolution boundary
//!
//! An [`Extension`] pairs an identifier with a zero-argument
//! constructor for one role. Constructors are typed per role, so a
//! resolved extension can only ever produce a provider that already
//! satisfies the contract it was registered under.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::provider::{BoxError, HookProvider, PersistenceProvider};
use crate::role::ProviderRole;

/// Zero-argument constructor producing a boxed provider.
pub type Constructor<T> = Arc<dyn Fn() -> Result<Box<T>, BoxError> + Send + Sync>;

/// Role-tagged constructor of an extension.
#[derive(Clone)]
pub enum ExtensionConstructor {
    Persistence(Constructor<dyn PersistenceProvider>),
    Hook(Constructor<dyn HookProvider>),
}

impl ExtensionConstructor {
    /// The role the constructed providers implement.
    pub fn role(&self) -> ProviderRole {
        match self {
            ExtensionConstructor::Persistence(_) => ProviderRole::Persistence,
            ExtensionConstructor::Hook(_) => ProviderRole::Hook,
        }
    }

    pub fn as_persistence(&self) -> Option<&Constructor<dyn PersistenceProvider>> {
        match self {
            ExtensionConstructor::Persistence(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_hook(&self) -> Option<&Constructor<dyn HookProvider>> {
        match self {
            ExtensionConstructor::Hook(f) => Some(f),
            _ => None,
        }
    }
}

/// A loadable provider implementation.
#[derive(Clone)]
pub struct Extension {
    identifier: String,
    description: String,
    constructor: ExtensionConstructor,
}

impl Extension {
    pub fn new(
        identifier: impl Into<String>,
        description: impl Into<String>,
        constructor: ExtensionConstructor,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            description: description.into(),
            constructor,
        }
    }

    /// Extension implementing [`PersistenceProvider`].
    pub fn persistence<P, F>(identifier: impl Into<String>, description: impl Into<String>, factory: F) -> Self
    where
        P: PersistenceProvider,
        F: Fn() -> Result<P, BoxError> + Send + Sync + 'static,
    {
        let constructor: Constructor<dyn PersistenceProvider> =
            Arc::new(move || factory().map(|p| Box::new(p) as Box<dyn PersistenceProvider>));
        Self::new(identifier, description, ExtensionConstructor::Persistence(constructor))
    }

    /// Extension implementing [`HookProvider`].
    pub fn hook<H, F>(identifier: impl Into<String>, description: impl Into<String>, factory: F) -> Self
    where
        H: HookProvider,
        F: Fn() -> Result<H, BoxError> + Send + Sync + 'static,
    {
        let constructor: Constructor<dyn HookProvider> =
            Arc::new(move || factory().map(|h| Box::new(h) as Box<dyn HookProvider>));
        Self::new(identifier, description, ExtensionConstructor::Hook(constructor))
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn role(&self) -> ProviderRole {
        self.constructor.role()
    }

    pub fn constructor(&self) -> &ExtensionConstructor {
        &self.constructor
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("identifier", &self.identifier)
            .field("description", &self.description)
            .field("role", &self.role())
            .finish()
    }
}

/// Maps an extension identifier to a loadable implementation.
///
/// How resolution happens is up to the implementor; the factory only
/// distinguishes found from not found.
pub trait ExtensionResolver: Send + Sync {
    fn resolve(&self, identifier: &str) -> Option<Extension>;
}

impl<R: ExtensionResolver + ?Sized> ExtensionResolver for Arc<R> {
    fn resolve(&self, identifier: &str) -> Option<Extension> {
        (**self).resolve(identifier)
    }
}

/// Lets a host keep registering extensions after the factory was built.
impl<R: ExtensionResolver> ExtensionResolver for RwLock<R> {
    fn resolve(&self, identifier: &str) -> Option<Extension> {
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .resolve(identifier)
    }
}
