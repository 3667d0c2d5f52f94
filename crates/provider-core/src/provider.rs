//! Contracts implemented by providers
//!
//! A provider is built through a zero-argument constructor, configured
//! exactly once through [`Provider::on_configured`], and shared
//! immutably for the rest of the process lifetime.

use crate::context::ProviderConfigurationContext;

/// Boxed error type used for construction failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error a provider reports when it rejects its configuration or
/// fails an operation.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("missing required property '{name}'")]
    MissingProperty { name: String },

    #[error("invalid value {value:?} for property '{name}': {reason}")]
    InvalidProperty {
        name: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Other(#[from] BoxError),
}

impl ProviderError {
    pub fn invalid(name: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProperty {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn other(err: impl Into<BoxError>) -> Self {
        Self::Other(err.into())
    }
}

/// Capability shared by every provider role.
pub trait Provider: Send + Sync + 'static {
    /// Receive the provider's configuration.
    ///
    /// Called exactly once, immediately after construction and before
    /// the instance becomes visible to anyone else. Returning an error
    /// discards the instance.
    fn on_configured(&mut self, context: &ProviderConfigurationContext) -> Result<(), ProviderError>;
}

/// Storage backend role. Exactly one is active per factory.
pub trait PersistenceProvider: Provider {
    fn save(&self, key: &str, content: &[u8]) -> Result<(), ProviderError>;

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, ProviderError>;

    /// Remove the content stored under `key`, returning whether anything
    /// was removed.
    fn delete(&self, key: &str) -> Result<bool, ProviderError>;
}

/// Event hook role. Any number may be active, invoked in document order.
pub trait HookProvider: Provider {
    fn handle(&self, event: &HookEvent) -> Result<(), ProviderError>;

    /// Whether this hook wants to see `event`.
    fn should_handle(&self, _event: &HookEvent) -> bool {
        true
    }
}

/// An event delivered to hook providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEvent {
    kind: String,
    fields: Vec<(String, String)>,
}

impl HookEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First value recorded for `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
