//! Factory lifecycle tests
//!
//! Initialization idempotence, retry after failed initialization, and
//! retry of role resolution after a failure.

use provider_core::{
    ErrorKind, ExtensionRegistry, FactorySettings, ProviderFactory, StandardProviderFactory,
};
use provider_test_utils::stubs::{STUB_PERSISTENCE, StubPersistenceProvider};
use provider_test_utils::{CountingLoader, Probe, TestFactory};
use rstest::rstest;
use std::fs;
use std::sync::{Arc, RwLock};
use tempfile::TempDir;

const VALID_DOCUMENT: &str = r#"
[persistence_provider]
extension = "stub.PersistenceProvider"
property = [{ name = "dir", value = "/tmp/x" }]
"#;

#[test]
fn test_repeated_initialize_loads_once() {
    let fixture = TestFactory::new(VALID_DOCUMENT);

    for _ in 0..5 {
        fixture.factory.initialize().unwrap();
    }

    assert!(fixture.factory.is_initialized());
    assert_eq!(fixture.loader.load_count(), 1);
}

#[test]
fn test_initialize_ignores_later_document_changes() {
    let fixture = TestFactory::new(VALID_DOCUMENT);
    fixture.factory.initialize().unwrap();

    fixture.write_document("this is not a valid document [");
    fixture.factory.initialize().unwrap();

    assert!(fixture.factory.persistence_provider().is_ok());
    assert_eq!(fixture.loader.load_count(), 1);
}

#[test]
fn test_accessors_before_initialize() {
    let fixture = TestFactory::new(VALID_DOCUMENT);

    let persistence = fixture.factory.persistence_provider().err().unwrap();
    let hooks = fixture.factory.hook_providers().err().unwrap();

    assert_eq!(persistence.kind(), ErrorKind::FactoryNotInitialized);
    assert_eq!(hooks.kind(), ErrorKind::FactoryNotInitialized);
    assert_eq!(fixture.loader.load_count(), 0);
}

#[rstest]
#[case::syntax("[persistence_provider\nextension = \"x\"")]
#[case::unknown_section("[authorizer]\nextension = \"stub.PersistenceProvider\"\n")]
#[case::missing_extension("[persistence_provider]\nproperty = []\n")]
#[case::empty_extension("[persistence_provider]\nextension = \"\"\n")]
#[case::bad_hook("[[hook_provider]]\nextension = 42\n")]
fn test_malformed_document_then_retry(#[case] malformed: &str) {
    let fixture = TestFactory::new(malformed);

    let err = fixture.factory.initialize().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(!fixture.factory.is_initialized());
    assert_eq!(
        fixture.factory.persistence_provider().err().map(|e| e.kind()),
        Some(ErrorKind::FactoryNotInitialized)
    );

    fixture.write_document(VALID_DOCUMENT);
    fixture.factory.initialize().unwrap();

    assert!(fixture.factory.is_initialized());
    assert!(fixture.factory.persistence_provider().is_ok());
    assert_eq!(fixture.loader.load_count(), 2);
}

#[test]
fn test_missing_document_then_retry() {
    let fixture = TestFactory::without_document();

    let err = fixture.factory.initialize().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
    assert!(err.to_string().contains("providers.toml"));
    assert!(!fixture.factory.is_initialized());

    fixture.write_document(VALID_DOCUMENT);
    fixture.factory.initialize().unwrap();
    assert!(fixture.factory.is_initialized());
}

#[test]
fn test_undecodable_document_is_invalid_then_retry() {
    let fixture = TestFactory::new(VALID_DOCUMENT);
    fs::write(fixture.path(), b"[persistence_provider]\nextension = \"\xff\xfe\"\n").unwrap();

    let err = fixture.factory.initialize().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(err.to_string().contains("UTF-8"));
    assert!(!fixture.factory.is_initialized());

    fixture.write_document(VALID_DOCUMENT);
    fixture.factory.initialize().unwrap();
    assert!(fixture.factory.persistence_provider().is_ok());
}

#[test]
fn test_empty_document_initializes() {
    let fixture = TestFactory::new("");

    fixture.factory.initialize().unwrap();

    assert_eq!(
        fixture.factory.persistence_provider().err().map(|e| e.kind()),
        Some(ErrorKind::RoleMissing)
    );
    assert!(fixture.factory.hook_providers().unwrap().is_empty());
}

#[test]
fn test_failed_resolution_is_retried_once_extension_appears() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("providers.toml");
    fs::write(&path, VALID_DOCUMENT).unwrap();

    let probe = Probe::new();
    let registry = Arc::new(RwLock::new(ExtensionRegistry::new()));
    let factory = StandardProviderFactory::new(FactorySettings::new(&path), registry.clone());
    factory.initialize().unwrap();

    let err = factory.persistence_provider().err().unwrap();
    assert_eq!(err.kind(), ErrorKind::ExtensionNotFound);

    let p = Arc::clone(&probe);
    registry.write().unwrap().register_persistence(STUB_PERSISTENCE, "late", move || {
        Ok(StubPersistenceProvider::new(STUB_PERSISTENCE, Arc::clone(&p)))
    });

    let first = factory.persistence_provider().unwrap();
    let second = factory.persistence_provider().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(probe.configured(), 1);
}

#[test]
fn test_factory_from_settings_file() {
    let temp = TempDir::new().unwrap();
    let conf = temp.path().join("conf");
    fs::create_dir_all(&conf).unwrap();
    fs::write(conf.join("providers.yaml"), "persistence_provider:\n  extension: stub.PersistenceProvider\n").unwrap();
    let settings_path = conf.join("factory.toml");
    fs::write(&settings_path, "providers_file = \"providers.yaml\"\n").unwrap();

    let settings = FactorySettings::load(&settings_path).unwrap();
    let probe = Probe::new();
    let loader = Arc::new(CountingLoader::new());
    let factory = StandardProviderFactory::with_loader(
        settings,
        Arc::new(provider_test_utils::stub_registry(&probe)),
        Arc::clone(&loader),
    );

    factory.initialize().unwrap();
    factory.persistence_provider().unwrap();

    assert_eq!(loader.load_count(), 1);
    assert_eq!(probe.configured(), 1);
    assert_eq!(factory.document().unwrap().hook_providers.len(), 0);
}
