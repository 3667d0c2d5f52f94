//! Provider configuration documents.
//!
//! This crate owns the on-disk shape of the providers configuration:
//! the fixed schema every document is checked against, the typed
//! model produced after validation, and the loader that ties the two
//! together.

pub mod document;
pub mod error;
pub mod loader;
pub mod schema;

pub use document::{Property, ProviderEntry, ProvidersDocument};
pub use error::{Error, Result};
pub use loader::{ConfigurationLoader, FileConfigurationLoader};
