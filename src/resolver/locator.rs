//! Resource location over a candidate list

use crate::resolver::candidates::CandidateList;
use crate::tree::{ResourcePath, ResourceStore};
use tracing::{debug, warn};

/// Outcome of a lookup, with probe bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<T> {
    pub value: T,
    /// Candidates actually probed
    pub probed: usize,
    /// Probes that failed with a store error
    pub failures: usize,
}

impl<T> Located<T> {
    /// Every probe failed, so "not found" is not trustworthy. Failures after
    /// a candidate was found (listing its children, reading its properties)
    /// never count here.
    pub fn all_failed(&self) -> bool {
        self.probed > 0 && self.failures >= self.probed
    }
}

/// First existing candidate; stops probing at the first hit.
///
/// Store errors mark that candidate as absent and the search continues.
pub fn locate_one(
    store: &dyn ResourceStore,
    candidates: &CandidateList,
) -> Located<Option<ResourcePath>> {
    let mut probed = 0;
    let mut failures = 0;
    for candidate in candidates {
        probed += 1;
        match store.exists(&candidate.path) {
            Ok(true) => {
                debug!(path = %candidate.path, origin = %candidate.origin, "Configuration resource found");
                return Located {
                    value: Some(candidate.path.clone()),
                    probed,
                    failures,
                };
            }
            Ok(false) => {}
            Err(err) => {
                failures += 1;
                warn!(path = %candidate.path, error = %err, "Candidate lookup failed, continuing fallback");
            }
        }
    }
    debug!(probed, failures, "No configuration resource found");
    Located {
        value: None,
        probed,
        failures,
    }
}

/// Children of the first existing candidate, in store order
///
/// Only the first existing candidate contributes; later candidates are never
/// merged into the collection. A container that exists but cannot be listed
/// yields an empty collection and is not counted as a failed probe.
pub fn locate_all(
    store: &dyn ResourceStore,
    candidates: &CandidateList,
) -> Located<Vec<ResourcePath>> {
    let container = locate_one(store, candidates);
    let Some(path) = &container.value else {
        return Located {
            value: Vec::new(),
            probed: container.probed,
            failures: container.failures,
        };
    };

    match store.children(path) {
        Ok(children) => {
            debug!(container = %path, members = children.len(), "Configuration collection found");
            Located {
                value: children,
                probed: container.probed,
                failures: container.failures,
            }
        }
        Err(err) => {
            warn!(container = %path, error = %err, "Listing configuration collection failed");
            Located {
                value: Vec::new(),
                probed: container.probed,
                failures: container.failures,
            }
        }
    }
}
