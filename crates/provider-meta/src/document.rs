//! Typed model of a providers configuration document
//!
//! Instances are only produced from documents that already passed
//! schema validation, and are immutable afterwards.

use serde::{Deserialize, Serialize};

/// A single `name = value` pair declared for a provider.
///
/// Names are not required to be unique within one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One configured provider: which extension to load and the
/// properties it is configured with, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderEntry {
    /// Identifier of the extension implementing this provider
    pub extension: String,
    #[serde(default, rename = "property", skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

impl ProviderEntry {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            properties: Vec::new(),
        }
    }

    /// Append a property, keeping declaration order.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }
}

/// Root of a providers configuration document.
///
/// The persistence provider is optional at this level; its absence is
/// only an error once something asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence_provider: Option<ProviderEntry>,
    #[serde(default, rename = "hook_provider", skip_serializing_if = "Vec::is_empty")]
    pub hook_providers: Vec<ProviderEntry>,
}

impl ProvidersDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persistence_provider(mut self, entry: ProviderEntry) -> Self {
        self.persistence_provider = Some(entry);
        self
    }

    pub fn with_hook_provider(mut self, entry: ProviderEntry) -> Self {
        self.hook_providers.push(entry);
        self
    }

    /// Whether the document declares no providers at all.
    pub fn is_empty(&self) -> bool {
        self.persistence_provider.is_none() && self.hook_providers.is_empty()
    }
}
