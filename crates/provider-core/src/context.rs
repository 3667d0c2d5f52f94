//! Configuration handed to a provider at its single configuration call

use std::collections::HashMap;

use provider_meta::Property;

use crate::provider::ProviderError;

/// Immutable name to value mapping derived from one provider entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderConfigurationContext {
    properties: HashMap<String, String>,
}

impl ProviderConfigurationContext {
    /// Fold declared properties into a context.
    ///
    /// Later properties overwrite earlier ones with the same name. No
    /// properties yields an empty context.
    pub fn from_properties<'a, I>(properties: I) -> Self
    where
        I: IntoIterator<Item = &'a Property>,
    {
        let properties = properties
            .into_iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect();
        Self { properties }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing property is a configuration error.
    pub fn require(&self, name: &str) -> Result<&str, ProviderError> {
        self.get(name).ok_or_else(|| ProviderError::MissingProperty {
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl From<HashMap<String, String>> for ProviderConfigurationContext {
    fn from(properties: HashMap<String, String>) -> Self {
        Self { properties }
    }
}
