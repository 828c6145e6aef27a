//! In-memory history router
//!
//! Keeps a forward-only stack of visited full paths and a table of named
//! routes, for headless clients and tests that have no browser history.

use std::collections::HashMap;

use parking_lot::RwLock;
use relay_core::Router;
use relay_domain::{compose_full_path, NavigationTarget, RelayError, Result, RouteLocation};

#[derive(Debug)]
pub struct HistoryRouter {
    entries: RwLock<Vec<String>>,
    routes: HashMap<String, String>,
}

impl HistoryRouter {
    /// Start with a single history entry at `initial`.
    pub fn new(initial: &str) -> Self {
        Self { entries: RwLock::new(vec![normalize(initial)]), routes: HashMap::new() }
    }

    /// Register a named route.
    pub fn with_route(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.routes.insert(name.into(), normalize(&path.into()));
        self
    }

    /// Every full path visited, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.read().clone()
    }

    fn location_path<'a>(&'a self, location: &'a RouteLocation) -> Result<&'a str> {
        if let Some(path) = location.path.as_deref() {
            return Ok(path);
        }

        let name = location.name.as_deref().ok_or_else(|| {
            RelayError::Navigation("route location needs a path or a name".into())
        })?;

        self.routes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| RelayError::Navigation(format!("unknown route name: {name}")))
    }
}

impl Default for HistoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router for HistoryRouter {
    fn current_full_path(&self) -> String {
        self.entries.read().last().cloned().unwrap_or_else(|| "/".to_string())
    }

    fn resolve(&self, target: &NavigationTarget) -> Result<String> {
        match target {
            NavigationTarget::Path(path) => Ok(normalize(path)),
            NavigationTarget::Location(location) => {
                let path = self.location_path(location)?;
                Ok(compose_full_path(path, &location.query, location.hash.as_deref()))
            }
        }
    }

    fn push(&self, full_path: &str) -> Result<()> {
        self.entries.write().push(full_path.to_string());
        Ok(())
    }
}

fn normalize(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
