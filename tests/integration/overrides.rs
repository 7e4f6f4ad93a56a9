//! Administrator overrides on top of stored values and defaults

use super::fixtures::{path, site_store, MailConfig};
use caconf::error::ConfigurationError;
use caconf::overrides::{OverrideProvider, StaticOverrideProvider};
use caconf::resolver::ConfigurationResolver;
use caconf::types::{Value, ValueMap};
use std::sync::Arc;

fn resolver_with(lines: &[&str]) -> ConfigurationResolver {
    let store = site_store();
    store
        .insert(
            "/content/site/sling:configs/mail",
            [("host", Value::from("stored.example")), ("port", Value::Long(587))],
        )
        .unwrap();
    let overrides = StaticOverrideProvider::parse(lines).unwrap();
    ConfigurationResolver::new(Arc::new(store)).with_overrides(Arc::new(overrides))
}

#[test]
fn test_override_beats_resource_value() {
    let resolver = resolver_with(&["mail/host=\"override.example\""]);
    let mail: MailConfig = resolver.get(&path("/content/site")).as_config().unwrap();
    assert_eq!(mail.host, "override.example");
    assert_eq!(mail.port, 587);
}

#[test]
fn test_override_beats_default_without_resource() {
    let resolver = resolver_with(&["mail/tls=true"]);
    // /content/other has no configuration of its own and no fallback exists
    let mail: MailConfig = resolver.get(&path("/content/other")).as_config().unwrap();
    assert!(mail.tls);
    assert_eq!(mail.host, "localhost");
}

#[test]
fn test_object_override_and_bare_words() {
    let resolver = resolver_with(&[
        "# administrator overrides",
        "",
        "mail={\"port\": 2525, \"recipients\": [\"a@example.com\", \"b@example.com\"]}",
        "mail/host=relay",
    ]);
    let mail: MailConfig = resolver.get(&path("/content/site/en")).as_config().unwrap();
    assert_eq!(mail.port, 2525);
    assert_eq!(mail.host, "relay");
    assert_eq!(mail.recipients.len(), 2);
}

#[test]
fn test_override_adds_keys_to_value_map() {
    let resolver = resolver_with(&["mail/debug=true"]);
    let values = resolver
        .get(&path("/content/site"))
        .name("mail")
        .as_value_map()
        .unwrap();
    assert_eq!(values.get("debug"), Some(&Value::Bool(true)));
    assert_eq!(values.get_as::<i64>("port"), Some(587));
}

#[test]
fn test_overrides_are_keyed_by_effective_name() {
    let resolver = resolver_with(&["smtp/host=\"other\""]);
    let mail: MailConfig = resolver.get(&path("/content/site")).as_config().unwrap();
    assert_eq!(mail.host, "stored.example");

    let renamed: MailConfig = resolver
        .get(&path("/content/site"))
        .name("smtp")
        .as_config()
        .unwrap();
    assert_eq!(renamed.host, "other");
}

#[test]
fn test_nested_overrides_use_nested_name() {
    let mut overrides = StaticOverrideProvider::new();
    overrides.set("SiteConfig/mail", "port", 2465i64);
    assert_eq!(
        overrides.get_override("SiteConfig/mail", "port"),
        Some(Value::Long(2465))
    );

    let resolver = ConfigurationResolver::new(Arc::new(site_store()))
        .with_overrides(Arc::new(overrides));
    let site: super::fixtures::SiteConfig =
        resolver.get(&path("/content/site")).as_config().unwrap();
    assert_eq!(site.mail.port, 2465);
}

#[test]
fn test_invalid_override_lines_rejected() {
    for line in ["no equals sign", "=1", "mail=1", "mail/host=null"] {
        let result = StaticOverrideProvider::parse([line]);
        assert!(
            matches!(result, Err(ConfigurationError::InvalidOverride { .. })),
            "'{}' should be rejected",
            line
        );
    }
}

/// Provider computing overrides on the fly
struct UppercaseHost;

impl OverrideProvider for UppercaseHost {
    fn overrides(&self, config_name: &str) -> ValueMap {
        let mut values = ValueMap::new();
        if config_name == "mail" {
            values.insert("host", "UPPER.EXAMPLE");
        }
        values
    }
}

#[test]
fn test_custom_override_provider() {
    let resolver =
        ConfigurationResolver::new(Arc::new(site_store())).with_overrides(Arc::new(UppercaseHost));
    let mail: MailConfig = resolver.get(&path("/content/site")).as_config().unwrap();
    assert_eq!(mail.host, "UPPER.EXAMPLE");
}
