//! Navigation targets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Where a navigation should go: a plain path string or a structured
/// location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavigationTarget {
    Path(String),
    Location(RouteLocation),
}

/// Structured route description, addressed either by path or by route name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl RouteLocation {
    pub fn path(path: impl Into<String>) -> Self {
        Self { path: Some(path.into()), ..Self::default() }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<RouteLocation> for NavigationTarget {
    fn from(location: RouteLocation) -> Self {
        Self::Location(location)
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Target already matched the current route; nothing happened.
    Skipped,
    /// One forward navigation to the contained full path.
    Pushed(String),
}

/// Compose a full path from a route path, its query and hash.
///
/// The path always starts with `/`; query pairs are form-encoded in key
/// order.
pub fn compose_full_path(path: &str, query: &BTreeMap<String, String>, hash: Option<&str>) -> String {
    let mut full = if path.starts_with('/') { path.to_string() } else { format!("/{path}") };

    if !query.is_empty() {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter())
            .finish();
        full.push('?');
        full.push_str(&encoded);
    }

    if let Some(hash) = hash.map(|h| h.trim_start_matches('#')).filter(|h| !h.is_empty()) {
        full.push('#');
        full.push_str(hash);
    }

    full
}
