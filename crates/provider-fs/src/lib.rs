//! Document I/O for the provider factory.
//!
//! Reads configuration documents from disk and turns them into a
//! format-neutral tree, regardless of whether they were written as
//! TOML, JSON, or YAML.

pub mod error;
pub mod format;
pub mod io;
pub mod store;

pub use error::{Error, Result};
pub use format::DocumentFormat;
pub use store::ConfigStore;
