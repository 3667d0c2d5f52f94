//! Error types for provider-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to find the providers configuration file at {}", path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Option<provider_fs::Error>,
    },

    #[error("Invalid providers configuration at {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },

    #[error(
        "Providers configuration at {} does not conform to the schema: {}",
        path.display(),
        violations.join("; ")
    )]
    SchemaViolation {
        path: PathBuf,
        violations: Vec<String>,
    },

    #[error("Providers schema could not be compiled: {message}")]
    Schema { message: String },
}

impl Error {
    /// Translate a document I/O failure for `path` into a loader error.
    pub fn from_fs(path: impl Into<PathBuf>, err: provider_fs::Error) -> Self {
        let path = path.into();
        match err {
            provider_fs::Error::NotFound { .. } => Self::ConfigNotFound { path, source: None },
            provider_fs::Error::Io { ref source, .. }
                if source.kind() == std::io::ErrorKind::InvalidData =>
            {
                Self::InvalidConfig {
                    path,
                    message: format!("document is not valid UTF-8: {source}"),
                }
            }
            provider_fs::Error::Io { .. } => Self::ConfigNotFound {
                path,
                source: Some(err),
            },
            provider_fs::Error::Parse { format, message, .. } => Self::InvalidConfig {
                path,
                message: format!("{format} syntax error: {message}"),
            },
            provider_fs::Error::UnsupportedFormat { extension } => Self::InvalidConfig {
                path,
                message: format!("unsupported document format {extension:?}"),
            },
        }
    }

    /// Whether the document was missing or unreadable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }
}
