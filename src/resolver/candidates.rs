//! Candidate path derivation
//!
//! For a context location and configuration name, lists every place a
//! configuration resource may live, most specific first.

use crate::error::ConfigurationError;
use crate::resolver::validate_config_name;
use crate::tree::ResourcePath;
use std::fmt;

/// Default name of the per-context configuration subtree
pub const DEFAULT_CONFIG_BUCKET: &str = "sling:configs";

/// Default global fallback roots, in lookup order
pub const DEFAULT_FALLBACK_ROOTS: [&str; 3] = ["/conf/global", "/apps/config", "/libs/config"];

/// Where a candidate came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOrigin {
    /// Configuration subtree of a context ancestor
    Context(ResourcePath),
    /// Global fallback root
    FallbackRoot(ResourcePath),
}

impl fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateOrigin::Context(path) => write!(f, "context {}", path),
            CandidateOrigin::FallbackRoot(path) => write!(f, "fallback {}", path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: ResourcePath,
    pub origin: CandidateOrigin,
}

/// Ordered candidate locations for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    candidates: Vec<Candidate>,
}

impl CandidateList {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &ResourcePath> {
        self.candidates.iter().map(|candidate| &candidate.path)
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Derives candidate lists
///
/// Deterministic: the same location, name and settings always give the same
/// list.
#[derive(Debug, Clone)]
pub struct CandidateDeriver {
    bucket: String,
    fallback_roots: Vec<ResourcePath>,
}

impl Default for CandidateDeriver {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_CONFIG_BUCKET.to_string(),
            fallback_roots: DEFAULT_FALLBACK_ROOTS
                .iter()
                .filter_map(|root| ResourcePath::parse(root).ok())
                .collect(),
        }
    }
}

impl CandidateDeriver {
    pub fn new(
        bucket: impl Into<String>,
        fallback_roots: Vec<ResourcePath>,
    ) -> Result<Self, ConfigurationError> {
        let bucket = bucket.into();
        validate_config_name(&bucket).map_err(|_| {
            ConfigurationError::Settings(format!("invalid configuration bucket '{}'", bucket))
        })?;
        Ok(Self {
            bucket,
            fallback_roots,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn fallback_roots(&self) -> &[ResourcePath] {
        &self.fallback_roots
    }

    /// `<ancestor>/<bucket>/<name>` for each ancestor nearest first, then
    /// `<root>/<name>` for each fallback root in order.
    pub fn derive(
        &self,
        location: &ResourcePath,
        name: &str,
    ) -> Result<CandidateList, ConfigurationError> {
        validate_config_name(name)?;
        let relative = format!("{}/{}", self.bucket, name);

        let ancestors = location.ancestors();
        let mut candidates = Vec::with_capacity(ancestors.len() + self.fallback_roots.len());
        for ancestor in ancestors {
            candidates.push(Candidate {
                path: ancestor.join(&relative)?,
                origin: CandidateOrigin::Context(ancestor),
            });
        }
        for root in &self.fallback_roots {
            candidates.push(Candidate {
                path: root.join(name)?,
                origin: CandidateOrigin::FallbackRoot(root.clone()),
            });
        }
        Ok(CandidateList { candidates })
    }
}
