//! Counting configuration loader

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use provider_meta::{ConfigurationLoader, FileConfigurationLoader, ProvidersDocument};

/// Wraps another loader and counts how often it is asked to load.
#[derive(Debug, Default)]
pub struct CountingLoader<L = FileConfigurationLoader> {
    inner: L,
    loads: AtomicUsize,
}

impl CountingLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: ConfigurationLoader> CountingLoader<L> {
    pub fn wrapping(inner: L) -> Self {
        Self {
            inner,
            loads: AtomicUsize::new(0),
        }
    }

    /// Number of load attempts, successful or not.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl<L: ConfigurationLoader> ConfigurationLoader for CountingLoader<L> {
    fn load(&self, path: &Path) -> provider_meta::Result<ProvidersDocument> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(path)
    }
}
