//! Configuration types and content trees shared by the integration tests

use caconf::schema::{
    Configuration, PropertyKind, ScalarType, SchemaDescriptor, SchemaValues,
};
use caconf::tree::{MemoryResourceStore, ResourcePath};
use std::sync::OnceLock;

/// Configuration stored under the name `mail`
#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    pub host: String,
    pub port: i64,
    pub tls: bool,
    pub recipients: Vec<String>,
}

impl Configuration for MailConfig {
    fn schema() -> &'static SchemaDescriptor {
        static SCHEMA: OnceLock<SchemaDescriptor> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            SchemaDescriptor::new("mail")
                .string("host", "localhost")
                .describe("SMTP host")
                .long("port", 25)
                .boolean("tls", false)
                .property("recipients", PropertyKind::Array(ScalarType::String))
        })
    }

    fn from_values(values: &SchemaValues) -> Self {
        Self {
            host: values.string("host"),
            port: values.long("port"),
            tls: values.boolean("tls"),
            recipients: values.strings("recipients"),
        }
    }
}

impl MailConfig {
    pub fn defaults() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 25,
            tls: false,
            recipients: Vec::new(),
        }
    }
}

/// Collection member stored under the name `links`
#[derive(Debug, Clone, PartialEq)]
pub struct LinkConfig {
    pub label: String,
    pub url: String,
    pub weight: f64,
}

impl Configuration for LinkConfig {
    fn schema() -> &'static SchemaDescriptor {
        static SCHEMA: OnceLock<SchemaDescriptor> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            SchemaDescriptor::new("links")
                .string("label", "")
                .string("url", "")
                .double("weight", 1.0)
        })
    }

    fn from_values(values: &SchemaValues) -> Self {
        Self {
            label: values.string("label"),
            url: values.string("url"),
            weight: values.double("weight"),
        }
    }
}

/// Configuration named after its type, with a nested and a repeated section
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub title: String,
    pub mail: MailConfig,
    pub links: Vec<LinkConfig>,
}

impl Configuration for SiteConfig {
    fn schema() -> &'static SchemaDescriptor {
        static SCHEMA: OnceLock<SchemaDescriptor> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            SchemaDescriptor::for_type::<SiteConfig>()
                .string("title", "Untitled")
                .nested("mail", MailConfig::schema())
                .nested_collection("links", LinkConfig::schema())
        })
    }

    fn from_values(values: &SchemaValues) -> Self {
        Self {
            title: values.string("title"),
            mail: values.nested("mail"),
            links: values.collection("links"),
        }
    }
}

pub fn path(p: &str) -> ResourcePath {
    ResourcePath::parse(p).unwrap()
}

/// A store with a site tree below `/content/site` and no configurations
pub fn site_store() -> MemoryResourceStore {
    let store = MemoryResourceStore::new();
    store
        .insert("/content/site/en/products/page", [("title", "Page")])
        .unwrap();
    store
}
