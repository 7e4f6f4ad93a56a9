//! CLI route table against content files and sled stores

use caconf::cli::{Cli, Commands, RunContext};
use caconf::error::ConfigurationError;
use clap::Parser;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONTENT: &str = r#"{
    "children": [
        {"name": "content", "children": [
            {"name": "site", "children": [
                {"name": "sling:configs", "children": [
                    {"name": "mail", "properties": {"host": "site.example", "port": 587}},
                    {"name": "feeds", "children": [
                        {"name": "news", "properties": {"url": "/news.xml"}},
                        {"name": "blog", "properties": {"url": "/blog.xml"}}
                    ]}
                ]}
            ]}
        ]},
        {"name": "conf", "children": [
            {"name": "global", "children": [
                {"name": "mail", "properties": {"host": "global.example"}}
            ]}
        ]}
    ]
}"#;

struct Fixture {
    dir: TempDir,
    settings: PathBuf,
    content: PathBuf,
}

fn fixture(settings: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.toml");
    std::fs::write(&settings_path, settings).unwrap();
    let content = dir.path().join("content.json");
    std::fs::write(&content, CONTENT).unwrap();
    Fixture {
        settings: settings_path,
        content,
        dir,
    }
}

fn context(fixture: &Fixture, store: Option<&Path>) -> RunContext {
    RunContext::new(
        fixture.dir.path().to_path_buf(),
        Some(fixture.settings.clone()),
        store.map(Path::to_path_buf),
    )
    .unwrap()
}

fn resolve(context_path: &str, name: &str, format: &str) -> Commands {
    Commands::Resolve {
        context: context_path.to_string(),
        name: name.to_string(),
        format: format.to_string(),
    }
}

#[test]
fn test_resolve_text_and_json() {
    let fixture = fixture("overrides = ['mail/tls=true']\n");
    let ctx = context(&fixture, Some(&fixture.content));

    let text = ctx.execute(&resolve("/content/site/en", "mail", "text")).unwrap();
    assert_eq!(text, "host = site.example\nport = 587\ntls = true");

    let json = ctx.execute(&resolve("/content/other", "mail", "json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["host"], "global.example");
    assert_eq!(value["tls"], true);
}

#[test]
fn test_collection_and_has() {
    let fixture = fixture("");
    let ctx = context(&fixture, Some(&fixture.content));

    let out = ctx
        .execute(&Commands::Collection {
            context: "/content/site".to_string(),
            name: "feeds".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(out, "[1]\n  url = /news.xml\n[2]\n  url = /blog.xml");

    let has = |name: &str| {
        ctx.execute(&Commands::Has {
            context: "/content/site".to_string(),
            name: name.to_string(),
        })
        .unwrap()
    };
    assert_eq!(has("mail"), "true");
    assert_eq!(has("missing"), "false");
}

#[test]
fn test_candidates_json_lists_lookup_order() {
    let fixture = fixture("[resolver]\nfallback_roots = [\"/conf/global\"]\n");
    let ctx = context(&fixture, Some(&fixture.content));

    let out = ctx
        .execute(&Commands::Candidates {
            context: "/content/site/en".to_string(),
            name: "mail".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let rows = value["candidates"].as_array().unwrap();
    let paths: Vec<&str> = rows.iter().map(|r| r["path"].as_str().unwrap()).collect();
    assert_eq!(
        paths,
        vec![
            "/content/site/en/sling:configs/mail",
            "/content/site/sling:configs/mail",
            "/content/sling:configs/mail",
            "/conf/global/mail",
        ]
    );
    let exists: Vec<bool> = rows.iter().map(|r| r["exists"].as_bool().unwrap()).collect();
    assert_eq!(exists, vec![false, true, false, true]);
}

#[test]
fn test_import_then_resolve_from_sled() {
    let fixture = fixture("");
    let db = fixture.dir.path().join("db");

    let importer = context(&fixture, None);
    let out = importer
        .execute(&Commands::Import {
            from: fixture.content.clone(),
            db: db.clone(),
        })
        .unwrap();
    assert!(out.starts_with("Imported 11 resources"));
    drop(importer);

    let ctx = context(&fixture, Some(&db));
    let text = ctx.execute(&resolve("/content/site", "mail", "text")).unwrap();
    assert!(text.contains("host = site.example"));
}

#[test]
fn test_missing_store_and_bad_input_are_errors() {
    let fixture = fixture("");
    let missing = fixture.dir.path().join("nope.json");
    let ctx = context(&fixture, Some(&missing));
    assert!(matches!(
        ctx.execute(&resolve("/content", "mail", "text")),
        Err(ConfigurationError::Store(_))
    ));

    let ctx = context(&fixture, None);
    assert!(matches!(
        ctx.execute(&resolve("content", "mail", "text")),
        Err(ConfigurationError::InvalidPath(_))
    ));
    assert!(matches!(
        ctx.execute(&resolve("/content", "/mail", "text")),
        Err(ConfigurationError::InvalidName(_))
    ));
    // No store: nothing resolves
    assert_eq!(
        ctx.execute(&resolve("/content", "mail", "text")).unwrap(),
        "No configuration values."
    );
}

#[test]
fn test_invalid_settings_rejected() {
    let fixture = fixture("overrides = ['not an override']\n");
    let result = RunContext::new(
        fixture.dir.path().to_path_buf(),
        Some(fixture.settings.clone()),
        None,
    );
    assert!(matches!(result, Err(ConfigurationError::Settings(_))));
}

#[test]
fn test_cli_parses_global_flags() {
    let cli = Cli::try_parse_from([
        "caconf",
        "--store",
        "content.json",
        "candidates",
        "--context",
        "/content/site",
        "--name",
        "mail",
        "--format",
        "json",
    ])
    .unwrap();
    assert_eq!(cli.store, Some(PathBuf::from("content.json")));
    assert!(matches!(cli.command, Commands::Candidates { ref format, .. } if format == "json"));
}
