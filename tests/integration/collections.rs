//! Configuration collections: children of the first existing container

use super::fixtures::{path, site_store, LinkConfig};
use caconf::error::StoreError;
use caconf::overrides::StaticOverrideProvider;
use caconf::resolver::ConfigurationResolver;
use caconf::tree::{MemoryResourceStore, ResourcePath, ResourceStore, ResourceStoreMut};
use caconf::types::ValueMap;
use std::sync::Arc;

/// Fails property reads for resources named `unreadable` and child listing
/// for resources named `unlisted`
struct PartialStore {
    inner: MemoryResourceStore,
}

impl ResourceStore for PartialStore {
    fn exists(&self, path: &ResourcePath) -> Result<bool, StoreError> {
        self.inner.exists(path)
    }

    fn properties(&self, path: &ResourcePath) -> Result<Option<ValueMap>, StoreError> {
        if path.name() == "unreadable" {
            return Err(StoreError::Backend(format!("{} unreadable", path)));
        }
        self.inner.properties(path)
    }

    fn children(&self, path: &ResourcePath) -> Result<Vec<ResourcePath>, StoreError> {
        if path.name() == "unlisted" {
            return Err(StoreError::Backend(format!("{} unlisted", path)));
        }
        self.inner.children(path)
    }
}

#[test]
fn test_collection_preserves_child_order() {
    let store = site_store();
    for (name, label) in [("zeta", "Z"), ("alpha", "A"), ("mid", "M")] {
        store
            .insert(
                &format!("/content/site/sling:configs/links/{}", name),
                [("label", label)],
            )
            .unwrap();
    }
    let resolver = ConfigurationResolver::new(Arc::new(store));

    let links: Vec<LinkConfig> = resolver
        .get(&path("/content/site/en"))
        .as_config_collection()
        .unwrap();
    let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["Z", "A", "M"]);
    assert!(links.iter().all(|l| l.weight == 1.0));
}

#[test]
fn test_removed_children_are_dropped() {
    let store = Arc::new(site_store());
    store
        .insert("/conf/global/links/one", [("label", "One")])
        .unwrap();
    store
        .insert("/conf/global/links/two", [("label", "Two")])
        .unwrap();
    let resolver = ConfigurationResolver::new(store.clone());
    let builder = resolver.get(&path("/content/site"));
    assert_eq!(builder.as_config_collection::<LinkConfig>().unwrap().len(), 2);

    assert!(store.remove(&path("/conf/global/links/one")).unwrap());
    let links = builder.as_config_collection::<LinkConfig>().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].label, "Two");
}

#[test]
fn test_only_first_container_contributes() {
    let store = site_store();
    store
        .insert("/content/site/sling:configs/links/local", [("label", "Local")])
        .unwrap();
    store
        .insert("/conf/global/links/global", [("label", "Global")])
        .unwrap();
    let resolver = ConfigurationResolver::new(Arc::new(store));

    let links: Vec<LinkConfig> = resolver
        .get(&path("/content/site/en"))
        .as_config_collection()
        .unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].label, "Local");
}

#[test]
fn test_empty_container_shadows_fallbacks() {
    let store = site_store();
    store
        .insert("/content/site/sling:configs/links", Vec::<(&str, &str)>::new())
        .unwrap();
    store
        .insert("/conf/global/links/global", [("label", "Global")])
        .unwrap();
    let resolver = ConfigurationResolver::new(Arc::new(store));

    let links: Vec<LinkConfig> = resolver
        .get(&path("/content/site"))
        .as_config_collection()
        .unwrap();
    assert!(links.is_empty());
}

#[test]
fn test_missing_collection_is_empty() {
    let resolver = ConfigurationResolver::new(Arc::new(site_store()));
    let builder = resolver.get(&path("/content/site"));
    assert!(builder.as_config_collection::<LinkConfig>().unwrap().is_empty());
    assert!(builder
        .name("links")
        .as_value_map_collection()
        .unwrap()
        .is_empty());
}

#[test]
fn test_item_overrides_use_item_name() {
    let store = site_store();
    store
        .insert("/conf/global/links/home", [("label", "Home"), ("url", "/")])
        .unwrap();
    store
        .insert("/conf/global/links/docs", [("label", "Docs"), ("url", "/docs")])
        .unwrap();
    let mut overrides = StaticOverrideProvider::new();
    overrides.set("links/docs", "url", "https://docs.example.com");
    let resolver =
        ConfigurationResolver::new(Arc::new(store)).with_overrides(Arc::new(overrides));

    let links: Vec<LinkConfig> = resolver
        .get(&path("/content/site"))
        .as_config_collection()
        .unwrap();
    assert_eq!(links[0].url, "/");
    assert_eq!(links[1].url, "https://docs.example.com");
}

#[test]
fn test_value_map_collection_members() {
    let store = site_store();
    store
        .insert("/apps/config/feeds/news", [("url", "/news.xml")])
        .unwrap();
    store
        .insert("/apps/config/feeds/blog", [("url", "/blog.xml")])
        .unwrap();
    let resolver = ConfigurationResolver::new(Arc::new(store));

    let feeds = resolver
        .get(&path("/content/site/en"))
        .name("feeds")
        .as_value_map_collection()
        .unwrap();
    let urls: Vec<String> = feeds
        .iter()
        .filter_map(|f| f.get_as::<String>("url"))
        .collect();
    assert_eq!(urls, vec!["/news.xml", "/blog.xml"]);
}

#[test]
fn test_adaptable_collection_in_order() {
    let store = site_store();
    store
        .insert("/conf/global/links/a", [("label", "A")])
        .unwrap();
    store
        .insert("/conf/global/links/b", [("label", "B")])
        .unwrap();
    let resolver = ConfigurationResolver::new(Arc::new(store));

    let paths: Vec<ResourcePath> = resolver
        .get(&path("/content/site"))
        .name("links")
        .as_adaptable_collection()
        .unwrap();
    assert_eq!(
        paths,
        vec![path("/conf/global/links/a"), path("/conf/global/links/b")]
    );
}

#[test]
fn test_unreadable_members_are_skipped() {
    let inner = site_store();
    inner.insert("/conf/global/list/good", [("v", 1i64)]).unwrap();
    inner.insert("/conf/global/list/unreadable", [("v", 2i64)]).unwrap();
    inner.insert("/conf/global/links/home", [("label", "Home")]).unwrap();
    inner.insert("/conf/global/links/unreadable", [("label", "Lost")]).unwrap();
    let resolver = ConfigurationResolver::new(Arc::new(PartialStore { inner }));
    let builder = resolver.get(&path("/content/site"));

    let members = builder.name("list").as_value_map_collection().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].get_as::<i64>("v"), Some(1));

    let links = builder.as_config_collection::<LinkConfig>().unwrap();
    let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["Home"]);
}

#[test]
fn test_unlistable_container_is_empty_not_unavailable() {
    let inner = site_store();
    inner.insert("/conf/global/unlisted/a", [("v", 1i64)]).unwrap();
    let resolver = ConfigurationResolver::new(Arc::new(PartialStore { inner }));
    let builder = resolver.get(&path("/content/site")).name("unlisted");

    let adapted: Vec<ResourcePath> = builder.as_adaptable_collection().unwrap();
    assert!(adapted.is_empty());
    assert!(builder.as_value_map_collection().unwrap().is_empty());
}
