//! Error types for provider-core

use std::fmt;
use std::path::PathBuf;

use crate::provider::{BoxError, ProviderError};
use crate::role::ProviderRole;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] provider_meta::Error),

    #[error("Unable to load factory settings from {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: provider_fs::Error,
    },

    #[error("ProviderFactory must be initialized before obtaining a provider")]
    NotInitialized,

    #[error("No {role} is configured in the providers configuration")]
    RoleMissing { role: ProviderRole },

    #[error("Error creating {role} with extension {extension}: {source}")]
    ProviderCreation {
        role: ProviderRole,
        extension: String,
        #[source]
        source: CreationError,
    },
}

/// Why a single provider could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("extension not found by the extension resolver")]
    ExtensionNotFound,

    #[error("instantiation failed: {0}")]
    InstantiationFailed(#[source] BoxError),

    #[error("configuration rejected: {0}")]
    ConfigurationRejected(#[source] ProviderError),
}

/// Flat classification of every failure the factory can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConfigNotFound,
    ConfigInvalid,
    FactoryNotInitialized,
    RoleMissing,
    ExtensionNotFound,
    InstantiationFailed,
    ConfigurationRejected,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(e) if e.is_not_found() => ErrorKind::ConfigNotFound,
            Error::Config(_) => ErrorKind::ConfigInvalid,
            Error::Settings { source, .. } if source.is_not_found() => ErrorKind::ConfigNotFound,
            Error::Settings { .. } => ErrorKind::ConfigInvalid,
            Error::NotInitialized => ErrorKind::FactoryNotInitialized,
            Error::RoleMissing { .. } => ErrorKind::RoleMissing,
            Error::ProviderCreation { source, .. } => match source {
                CreationError::ExtensionNotFound => ErrorKind::ExtensionNotFound,
                CreationError::InstantiationFailed(_) => ErrorKind::InstantiationFailed,
                CreationError::ConfigurationRejected(_) => ErrorKind::ConfigurationRejected,
            },
        }
    }

    /// The extension identifier involved, if the error concerns one.
    pub fn extension(&self) -> Option<&str> {
        match self {
            Error::ProviderCreation { extension, .. } => Some(extension),
            _ => None,
        }
    }

    /// The role involved, if the error concerns one.
    pub fn role(&self) -> Option<ProviderRole> {
        match self {
            Error::RoleMissing { role } | Error::ProviderCreation { role, .. } => Some(*role),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::ConfigNotFound => "config not found",
            ErrorKind::ConfigInvalid => "config invalid",
            ErrorKind::FactoryNotInitialized => "factory not initialized",
            ErrorKind::RoleMissing => "role missing",
            ErrorKind::ExtensionNotFound => "extension not found",
            ErrorKind::InstantiationFailed => "instantiation failed",
            ErrorKind::ConfigurationRejected => "configuration rejected",
        };
        f.write_str(name)
    }
}
