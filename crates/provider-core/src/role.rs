//! Provider roles

use std::fmt;

/// A logical slot in the host that a provider fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderRole {
    /// Exactly one active implementation, required once requested.
    Persistence,
    /// Zero or more implementations, kept in document order.
    Hook,
}

impl ProviderRole {
    /// Whether at most one provider may be active for this role.
    pub fn is_singleton(&self) -> bool {
        matches!(self, ProviderRole::Persistence)
    }
}

impl fmt::Display for ProviderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderRole::Persistence => write!(f, "PersistenceProvider"),
            ProviderRole::Hook => write!(f, "HookProvider"),
        }
    }
}
