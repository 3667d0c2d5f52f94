//! Factory wired to a temporary providers document

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use provider_core::{FactorySettings, StandardProviderFactory};
use tempfile::TempDir;

use crate::loader::CountingLoader;
use crate::stubs::{Probe, stub_registry};

/// A [`StandardProviderFactory`] reading `providers.toml` from a temp
/// directory, resolving against the stub registry, with its loads
/// counted.
///
/// ```ignore
/// let fixture = TestFactory::new(r#"
/// [persistence_provider]
/// extension = "stub.PersistenceProvider"
/// "#);
/// fixture.factory.initialize()?;
/// ```
pub struct TestFactory {
    pub factory: StandardProviderFactory,
    pub probe: Arc<Probe>,
    pub loader: Arc<CountingLoader>,
    path: PathBuf,
    _dir: TempDir,
}

impl TestFactory {
    /// Create the fixture with `content` written as the providers document.
    pub fn new(content: &str) -> Self {
        let fixture = Self::without_document();
        fixture.write_document(content);
        fixture
    }

    /// Create the fixture without writing any document yet.
    pub fn without_document() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("providers.toml");
        let probe = Probe::new();
        let loader = Arc::new(CountingLoader::new());
        let factory = StandardProviderFactory::with_loader(
            FactorySettings::new(&path),
            Arc::new(stub_registry(&probe)),
            Arc::clone(&loader),
        );

        Self {
            factory,
            probe,
            loader,
            path,
            _dir: dir,
        }
    }

    /// Write (or overwrite) the providers document.
    pub fn write_document(&self, content: &str) {
        fs::write(&self.path, content).expect("write providers document");
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
