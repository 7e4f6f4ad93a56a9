//! Resource path validation and normalization utilities

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Absolute, normalized path of a resource in the content tree
///
/// Paths are `/`-separated, NFC-normalized, carry no trailing slash (except
/// the root `/`) and contain no empty, `.` or `..` segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourcePath(String);

impl ResourcePath {
    /// The tree root `/`
    pub fn root() -> Self {
        ResourcePath("/".to_string())
    }

    /// Parse and normalize an absolute path
    pub fn parse(path: &str) -> Result<Self, StoreError> {
        let normalized = normalize_path_string(path.trim());
        if !normalized.starts_with('/') {
            return Err(StoreError::InvalidPath(format!(
                "path must be absolute: '{}'",
                path
            )));
        }
        if normalized == "/" {
            return Ok(Self::root());
        }

        let mut joined = String::with_capacity(normalized.len());
        for segment in normalized[1..].split('/') {
            validate_segment(segment, path)?;
            joined.push('/');
            joined.push_str(segment);
        }
        Ok(ResourcePath(joined))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Last path segment; empty for the root
    pub fn name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Parent path; `None` for the root
    pub fn parent(&self) -> Option<ResourcePath> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(ResourcePath(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Append a relative path (which may itself contain `/` separators)
    pub fn join(&self, relative: &str) -> Result<ResourcePath, StoreError> {
        let relative = normalize_path_string(relative.trim());
        let relative = relative.trim_start_matches('/');
        if relative.is_empty() {
            return Ok(self.clone());
        }

        let mut joined = if self.is_root() {
            String::new()
        } else {
            self.0.clone()
        };
        for segment in relative.split('/') {
            validate_segment(segment, &relative)?;
            joined.push('/');
            joined.push_str(segment);
        }
        Ok(ResourcePath(joined))
    }

    /// The path itself followed by each of its parents, nearest first,
    /// excluding the tree root.
    pub fn ancestors(&self) -> Vec<ResourcePath> {
        let mut chain = Vec::new();
        let mut current = Some(self.clone());
        while let Some(path) = current {
            if path.is_root() {
                break;
            }
            current = path.parent();
            chain.push(path);
        }
        chain
    }

    /// Number of segments (0 for the root)
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.matches('/').count()
        }
    }
}

fn validate_segment(segment: &str, original: &str) -> Result<(), StoreError> {
    match segment {
        "" => Err(StoreError::InvalidPath(format!(
            "empty segment in '{}'",
            original
        ))),
        "." | ".." => Err(StoreError::InvalidPath(format!(
            "relative segment '{}' in '{}'",
            segment, original
        ))),
        _ => Ok(()),
    }
}

/// Normalize a path string without validating it
///
/// Normalizes Unicode to NFC and removes trailing slashes (except root).
pub fn normalize_path_string(path: &str) -> String {
    let mut result: String = path.nfc().collect();
    if result.len() > 1 {
        while result.len() > 1 && result.ends_with('/') {
            result.pop();
        }
    }
    result
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ResourcePath {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ResourcePath::parse(&value)
    }
}

impl From<ResourcePath> for String {
    fn from(path: ResourcePath) -> Self {
        path.0
    }
}

impl std::str::FromStr for ResourcePath {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourcePath::parse(s)
    }
}
