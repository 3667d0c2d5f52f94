//! Stub providers
//!
//! Every stub reports construction, configuration and handled events
//! into a shared [`Probe`], which tests inspect afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::sync::Arc;
use std::time::Duration;

use provider_core::{
    BoxError, ExtensionRegistry, HookEvent, HookProvider, PersistenceProvider, Provider,
    ProviderConfigurationContext, ProviderError,
};

pub const STUB_PERSISTENCE: &str = "stub.PersistenceProvider";
pub const STUB_HOOK: &str = "stub.HookProvider";
pub const STUB_AUDIT_HOOK: &str = "stub.AuditHookProvider";
pub const REJECTING_PERSISTENCE: &str = "stub.RejectingPersistenceProvider";
pub const FAILING_PERSISTENCE: &str = "stub.FailingPersistenceProvider";
pub const FAILING_HOOK: &str = "stub.FailingHookProvider";

/// Shared recorder for stub activity.
#[derive(Debug, Default)]
pub struct Probe {
    constructed: AtomicUsize,
    configured: AtomicUsize,
    construct_delay: Mutex<Option<Duration>>,
    configurations: Mutex<Vec<(String, ProviderConfigurationContext)>>,
    handled: Mutex<Vec<(String, String)>>,
}

impl Probe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every stub constructor sleep, widening first-call races.
    pub fn set_construct_delay(&self, delay: Duration) {
        *lock(&self.construct_delay) = Some(delay);
    }

    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    pub fn configured(&self) -> usize {
        self.configured.load(Ordering::SeqCst)
    }

    /// `(extension, context)` for every successful configuration, in order.
    pub fn configurations(&self) -> Vec<(String, ProviderConfigurationContext)> {
        lock(&self.configurations).clone()
    }

    /// `(extension, event kind)` for every handled event, in order.
    pub fn handled(&self) -> Vec<(String, String)> {
        lock(&self.handled).clone()
    }

    fn on_construct(&self) {
        let delay = *lock(&self.construct_delay);
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        self.constructed.fetch_add(1, Ordering::SeqCst);
    }

    fn on_configure(&self, extension: &str, context: &ProviderConfigurationContext) {
        self.configured.fetch_add(1, Ordering::SeqCst);
        lock(&self.configurations).push((extension.to_string(), context.clone()));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory persistence stub.
#[derive(Debug)]
pub struct StubPersistenceProvider {
    extension: String,
    probe: Arc<Probe>,
    reject: bool,
    content: Mutex<HashMap<String, Vec<u8>>>,
}

impl StubPersistenceProvider {
    pub fn new(extension: impl Into<String>, probe: Arc<Probe>) -> Self {
        probe.on_construct();
        Self {
            extension: extension.into(),
            probe,
            reject: false,
            content: Mutex::new(HashMap::new()),
        }
    }

    /// A stub whose configuration step always fails.
    pub fn rejecting(extension: impl Into<String>, probe: Arc<Probe>) -> Self {
        Self {
            reject: true,
            ..Self::new(extension, probe)
        }
    }
}

impl Provider for StubPersistenceProvider {
    fn on_configured(&mut self, context: &ProviderConfigurationContext) -> Result<(), ProviderError> {
        if self.reject {
            return Err(ProviderError::invalid("dir", context.get("dir").unwrap_or(""), "rejected by stub"));
        }
        self.probe.on_configure(&self.extension, context);
        Ok(())
    }
}

impl PersistenceProvider for StubPersistenceProvider {
    fn save(&self, key: &str, content: &[u8]) -> Result<(), ProviderError> {
        lock(&self.content).insert(key.to_string(), content.to_vec());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, ProviderError> {
        Ok(lock(&self.content).get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<bool, ProviderError> {
        Ok(lock(&self.content).remove(key).is_some())
    }
}

/// Hook stub that journals handled events into the probe.
#[derive(Debug)]
pub struct StubHookProvider {
    extension: String,
    probe: Arc<Probe>,
    only_kind: Option<String>,
}

impl StubHookProvider {
    pub fn new(extension: impl Into<String>, probe: Arc<Probe>) -> Self {
        probe.on_construct();
        Self {
            extension: extension.into(),
            probe,
            only_kind: None,
        }
    }
}

impl Provider for StubHookProvider {
    fn on_configured(&mut self, context: &ProviderConfigurationContext) -> Result<(), ProviderError> {
        self.only_kind = context.get("only").map(str::to_string);
        self.probe.on_configure(&self.extension, context);
        Ok(())
    }
}

impl HookProvider for StubHookProvider {
    fn handle(&self, event: &HookEvent) -> Result<(), ProviderError> {
        lock(&self.probe.handled).push((self.extension.clone(), event.kind().to_string()));
        Ok(())
    }

    fn should_handle(&self, event: &HookEvent) -> bool {
        self.only_kind.as_deref().is_none_or(|kind| kind == event.kind())
    }
}

/// Registry with every stub extension registered against `probe`.
pub fn stub_registry(probe: &Arc<Probe>) -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::new();

    let p = Arc::clone(probe);
    registry.register_persistence(STUB_PERSISTENCE, "in-memory persistence stub", move || {
        Ok(StubPersistenceProvider::new(STUB_PERSISTENCE, Arc::clone(&p)))
    });

    let p = Arc::clone(probe);
    registry.register_persistence(REJECTING_PERSISTENCE, "rejects its configuration", move || {
        Ok(StubPersistenceProvider::rejecting(REJECTING_PERSISTENCE, Arc::clone(&p)))
    });

    registry.register_persistence(FAILING_PERSISTENCE, "constructor always fails", || {
        Err::<StubPersistenceProvider, _>(BoxError::from("stub constructor failure"))
    });

    for hook in [STUB_HOOK, STUB_AUDIT_HOOK] {
        let p = Arc::clone(probe);
        registry.register_hook(hook, "journaling hook stub", move || {
            Ok(StubHookProvider::new(hook, Arc::clone(&p)))
        });
    }

    registry.register_hook(FAILING_HOOK, "constructor always fails", || {
        Err::<StubHookProvider, _>(BoxError::from("stub constructor failure"))
    });

    registry
}
