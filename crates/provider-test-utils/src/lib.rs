//! Shared test utilities for the provider factory workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`stubs`]: stub providers that report into a shared [`Probe`]
//! - [`loader`]: a [`ConfigurationLoader`](provider_meta::ConfigurationLoader) that counts loads
//! - [`fixture`]: [`TestFactory`], a factory wired to an on-disk document

pub mod fixture;
pub mod loader;
pub mod stubs;

pub use fixture::TestFactory;
pub use loader::CountingLoader;
pub use stubs::{Probe, StubHookProvider, StubPersistenceProvider, stub_registry};
