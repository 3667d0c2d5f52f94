//! End-to-end tests for provider resolution
//!
//! Exercises the complete flow: document on disk -> initialize ->
//! resolve roles through the stub registry -> use the providers.

use pretty_assertions::assert_eq;
use provider_core::{ErrorKind, HookEvent, ProviderFactory, ProviderRole};
use provider_test_utils::TestFactory;
use provider_test_utils::stubs::{
    FAILING_HOOK, FAILING_PERSISTENCE, REJECTING_PERSISTENCE, STUB_AUDIT_HOOK, STUB_HOOK,
    STUB_PERSISTENCE,
};
use rstest::rstest;
use std::collections::HashMap;
use std::sync::Arc;

const FULL_DOCUMENT: &str = r#"
[persistence_provider]
extension = "stub.PersistenceProvider"
property = [{ name = "dir", value = "/tmp/x" }]

[[hook_provider]]
extension = "stub.AuditHookProvider"
property = [{ name = "only", value = "CREATE_BUCKET" }]

[[hook_provider]]
extension = "stub.HookProvider"
"#;

fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_persistence_receives_exact_properties() {
    let fixture = TestFactory::new(
        r#"
[persistence_provider]
extension = "stub.PersistenceProvider"
property = [{ name = "dir", value = "/tmp/x" }]
"#,
    );
    fixture.factory.initialize().unwrap();

    let _provider = fixture.factory.persistence_provider().unwrap();

    let configurations = fixture.probe.configurations();
    assert_eq!(configurations.len(), 1);
    assert_eq!(configurations[0].0, STUB_PERSISTENCE);
    assert_eq!(configurations[0].1.properties(), &map(&[("dir", "/tmp/x")]));
}

#[test]
fn test_persistence_is_cached() {
    let fixture = TestFactory::new(FULL_DOCUMENT);
    fixture.factory.initialize().unwrap();

    let first = fixture.factory.persistence_provider().unwrap();
    let second = fixture.factory.persistence_provider().unwrap();
    let third = fixture.factory.persistence_provider().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &third));
    assert_eq!(fixture.probe.constructed(), 1);
    assert_eq!(fixture.probe.configured(), 1);
}

#[test]
fn test_persistence_provider_is_usable() {
    let fixture = TestFactory::new(FULL_DOCUMENT);
    fixture.factory.initialize().unwrap();
    let persistence = fixture.factory.persistence_provider().unwrap();

    persistence.save("bucket/flow/1", b"snapshot").unwrap();

    let again = fixture.factory.persistence_provider().unwrap();
    assert_eq!(again.load("bucket/flow/1").unwrap(), Some(b"snapshot".to_vec()));
    assert!(again.delete("bucket/flow/1").unwrap());
    assert_eq!(again.load("bucket/flow/1").unwrap(), None);
}

#[test]
fn test_duplicate_properties_last_one_wins() {
    let fixture = TestFactory::new(
        r#"
[persistence_provider]
extension = "stub.PersistenceProvider"
property = [
    { name = "dir", value = "/first" },
    { name = "retries", value = "3" },
    { name = "dir", value = "/second" },
]
"#,
    );
    fixture.factory.initialize().unwrap();
    fixture.factory.persistence_provider().unwrap();

    let configurations = fixture.probe.configurations();
    assert_eq!(
        configurations[0].1.properties(),
        &map(&[("dir", "/second"), ("retries", "3")])
    );
}

#[test]
fn test_missing_persistence_role() {
    let fixture = TestFactory::new("[[hook_provider]]\nextension = \"stub.HookProvider\"\n");

    fixture.factory.initialize().unwrap();
    let err = fixture.factory.persistence_provider().err().unwrap();

    assert_eq!(err.kind(), ErrorKind::RoleMissing);
    assert_eq!(err.role(), Some(ProviderRole::Persistence));
    assert_eq!(fixture.probe.constructed(), 0);
}

#[test]
fn test_no_hooks_is_empty_sequence() {
    let fixture = TestFactory::new(
        "[persistence_provider]\nextension = \"stub.PersistenceProvider\"\n",
    );
    fixture.factory.initialize().unwrap();

    let hooks = fixture.factory.hook_providers().unwrap();

    assert!(hooks.is_empty());
}

#[test]
fn test_hooks_follow_document_order() {
    let fixture = TestFactory::new(
        r#"
[[hook_provider]]
extension = "stub.HookProvider"
property = [{ name = "n", value = "1" }]

[[hook_provider]]
extension = "stub.AuditHookProvider"
property = [{ name = "n", value = "2" }]

[[hook_provider]]
extension = "stub.HookProvider"
property = [{ name = "n", value = "3" }]
"#,
    );
    fixture.factory.initialize().unwrap();

    let hooks = fixture.factory.hook_providers().unwrap();
    assert_eq!(hooks.len(), 3);

    let event = HookEvent::new("CREATE_FLOW");
    for hook in hooks.iter() {
        hook.handle(&event).unwrap();
    }

    let handled: Vec<String> = fixture.probe.handled().into_iter().map(|(ext, _)| ext).collect();
    assert_eq!(handled, vec![STUB_HOOK, STUB_AUDIT_HOOK, STUB_HOOK]);

    let ns: Vec<String> = fixture
        .probe
        .configurations()
        .iter()
        .map(|(_, ctx)| ctx.get("n").unwrap_or_default().to_string())
        .collect();
    assert_eq!(ns, vec!["1", "2", "3"]);
}

#[test]
fn test_hooks_are_cached() {
    let fixture = TestFactory::new(FULL_DOCUMENT);
    fixture.factory.initialize().unwrap();

    let first = fixture.factory.hook_providers().unwrap();
    let second = fixture.factory.hook_providers().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fixture.probe.configured(), 2);
}

#[test]
fn test_hook_filtering_uses_configuration() {
    let fixture = TestFactory::new(FULL_DOCUMENT);
    fixture.factory.initialize().unwrap();
    let hooks = fixture.factory.hook_providers().unwrap();

    let delete = HookEvent::new("DELETE_BUCKET").with_field("bucket_id", "b-1");
    let interested: Vec<bool> = hooks.iter().map(|h| h.should_handle(&delete)).collect();

    assert_eq!(interested, vec![false, true]);
}

#[rstest]
#[case::unknown_extension("stub.DoesNotExist", ErrorKind::ExtensionNotFound)]
#[case::constructor_fails(FAILING_PERSISTENCE, ErrorKind::InstantiationFailed)]
#[case::wrong_role(STUB_HOOK, ErrorKind::InstantiationFailed)]
#[case::configuration_rejected(REJECTING_PERSISTENCE, ErrorKind::ConfigurationRejected)]
fn test_persistence_failures(#[case] extension: &str, #[case] kind: ErrorKind) {
    let fixture = TestFactory::new(&format!(
        "[persistence_provider]\nextension = \"{extension}\"\nproperty = [{{ name = \"dir\", value = \"/tmp/x\" }}]\n"
    ));
    fixture.factory.initialize().unwrap();

    let err = fixture.factory.persistence_provider().err().unwrap();

    assert_eq!(err.kind(), kind);
    assert_eq!(err.extension(), Some(extension));
    assert!(err.to_string().contains(extension));
}

#[test]
fn test_one_failing_hook_fails_the_whole_list() {
    let fixture = TestFactory::new(&format!(
        r#"
[[hook_provider]]
extension = "{STUB_HOOK}"

[[hook_provider]]
extension = "{FAILING_HOOK}"

[[hook_provider]]
extension = "{STUB_AUDIT_HOOK}"
"#
    ));
    fixture.factory.initialize().unwrap();

    let err = fixture.factory.hook_providers().err().unwrap();

    assert_eq!(err.kind(), ErrorKind::InstantiationFailed);
    assert_eq!(err.extension(), Some(FAILING_HOOK));
    assert_eq!(err.role(), Some(ProviderRole::Hook));
    // resolution stops at the failing entry
    assert_eq!(fixture.probe.configured(), 1);
}

#[test]
fn test_roles_resolve_independently() {
    let fixture = TestFactory::new(&format!(
        r#"
[persistence_provider]
extension = "{REJECTING_PERSISTENCE}"

[[hook_provider]]
extension = "{STUB_HOOK}"
"#
    ));
    fixture.factory.initialize().unwrap();

    assert!(fixture.factory.persistence_provider().is_err());
    assert_eq!(fixture.factory.hook_providers().unwrap().len(), 1);
}
