//! Navigation service

use std::sync::Arc;

use relay_domain::{NavigationOutcome, NavigationTarget, Result};
use tracing::debug;

use super::ports::Router;

/// Navigation helper over a [`Router`]
pub struct Navigator {
    router: Arc<dyn Router>,
}

impl Navigator {
    pub fn new(router: Arc<dyn Router>) -> Self {
        Self { router }
    }

    /// Navigate to `target` unless it resolves to the current full path.
    ///
    /// # Errors
    /// Returns the router's error if the target cannot be resolved or the
    /// push fails.
    pub fn navigate(&self, target: impl Into<NavigationTarget>) -> Result<NavigationOutcome> {
        let target = target.into();
        let full_path = self.router.resolve(&target)?;
        let current = self.router.current_full_path();

        if full_path == current {
            debug!(%full_path, "already on target route, skipping navigation");
            return Ok(NavigationOutcome::Skipped);
        }

        self.router.push(&full_path)?;
        debug!(from = %current, to = %full_path, "navigated");
        Ok(NavigationOutcome::Pushed(full_path))
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use relay_domain::{compose_full_path, RelayError, RouteLocation};

    use super::*;

    /// Router that resolves path targets only and records pushes
    struct FakeRouter {
        current: Mutex<String>,
        pushes: Mutex<Vec<String>>,
    }

    impl FakeRouter {
        fn at(path: &str) -> Arc<Self> {
            Arc::new(Self { current: Mutex::new(path.to_string()), pushes: Mutex::new(Vec::new()) })
        }
    }

    impl Router for FakeRouter {
        fn current_full_path(&self) -> String {
            self.current.lock().clone()
        }

        fn resolve(&self, target: &NavigationTarget) -> Result<String> {
            match target {
                NavigationTarget::Path(path) => Ok(path.clone()),
                NavigationTarget::Location(RouteLocation { path: Some(path), query, hash, .. }) => {
                    Ok(compose_full_path(path, query, hash.as_deref()))
                }
                NavigationTarget::Location(_) => {
                    Err(RelayError::Navigation("named routes unsupported".into()))
                }
            }
        }

        fn push(&self, full_path: &str) -> Result<()> {
            self.pushes.lock().push(full_path.to_string());
            *self.current.lock() = full_path.to_string();
            Ok(())
        }
    }

    #[test]
    fn same_path_is_a_no_op() {
        let router = FakeRouter::at("/a/b");
        let navigator = Navigator::new(router.clone());

        assert_eq!(navigator.navigate("/a/b").unwrap(), NavigationOutcome::Skipped);
        assert!(router.pushes.lock().is_empty());
    }

    #[test]
    fn different_path_pushes_once() {
        let router = FakeRouter::at("/a/b");
        let navigator = Navigator::new(router.clone());

        assert_eq!(
            navigator.navigate("/a/c").unwrap(),
            NavigationOutcome::Pushed("/a/c".to_string())
        );
        assert_eq!(*router.pushes.lock(), vec!["/a/c".to_string()]);
    }

    #[test]
    fn structured_target_compares_full_path() {
        let router = FakeRouter::at("/list?page=2");
        let navigator = Navigator::new(router.clone());

        let same = RouteLocation::path("/list").with_query("page", "2");
        assert_eq!(navigator.navigate(same).unwrap(), NavigationOutcome::Skipped);

        let next = RouteLocation::path("/list").with_query("page", "3");
        assert_eq!(
            navigator.navigate(next).unwrap(),
            NavigationOutcome::Pushed("/list?page=3".to_string())
        );
    }

    #[test]
    fn resolve_errors_propagate_without_navigation() {
        let router = FakeRouter::at("/");
        let navigator = Navigator::new(router.clone());

        let result = navigator.navigate(RouteLocation::named("home"));
        assert!(matches!(result, Err(RelayError::Navigation(_))));
        assert!(router.pushes.lock().is_empty());
    }
}
