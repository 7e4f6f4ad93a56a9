//! Content trees loaded from JSON and TOML documents

use super::fixtures::{path, LinkConfig, MailConfig};
use caconf::resolver::ConfigurationResolver;
use caconf::store::SledResourceStore;
use caconf::tree::import::{import_file, load_file};
use std::sync::Arc;
use tempfile::TempDir;

const CONTENT_JSON: &str = r#"{
    "children": [
        {"name": "content", "children": [
            {"name": "site", "children": [
                {"name": "sling:configs", "children": [
                    {"name": "mail", "properties": {"host": "json.example", "port": 587}}
                ]},
                {"name": "en"}
            ]}
        ]},
        {"name": "conf", "children": [
            {"name": "global", "children": [
                {"name": "links", "children": [
                    {"name": "b", "properties": {"label": "B"}},
                    {"name": "a", "properties": {"label": "A"}}
                ]}
            ]}
        ]}
    ]
}"#;

const CONTENT_TOML: &str = r#"
[[children]]
name = "libs"

[[children.children]]
name = "config"

[[children.children.children]]
name = "mail"
properties = { host = "toml.example", tls = true, recipients = ["ops@example.com"] }
"#;

#[test]
fn test_resolve_from_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("content.json");
    std::fs::write(&file, CONTENT_JSON).unwrap();

    let resolver = ConfigurationResolver::new(Arc::new(load_file(&file).unwrap()));
    let builder = resolver.get(&path("/content/site/en"));

    let mail: MailConfig = builder.as_config().unwrap();
    assert_eq!(mail.host, "json.example");
    assert_eq!(mail.port, 587);

    let links: Vec<LinkConfig> = builder.as_config_collection().unwrap();
    let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["B", "A"]);
}

#[test]
fn test_resolve_from_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("content.toml");
    std::fs::write(&file, CONTENT_TOML).unwrap();

    let resolver = ConfigurationResolver::new(Arc::new(load_file(&file).unwrap()));
    let mail: MailConfig = resolver.get(&path("/content/site")).as_config().unwrap();
    assert_eq!(mail.host, "toml.example");
    assert!(mail.tls);
    assert_eq!(mail.recipients, vec!["ops@example.com".to_string()]);
}

#[test]
fn test_import_into_sled() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("content.json");
    std::fs::write(&file, CONTENT_JSON).unwrap();
    let db_dir = temp_dir.path().join("db");

    let store = SledResourceStore::new(&db_dir).unwrap();
    let written = import_file(&store, &file).unwrap();
    assert_eq!(written, 11);

    let resolver = ConfigurationResolver::new(Arc::new(store));
    assert!(resolver.get(&path("/content/site")).has_name("mail").unwrap());
}

#[test]
fn test_unknown_extension_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("content.yaml");
    std::fs::write(&file, "children: []").unwrap();
    assert!(load_file(&file).is_err());
}
