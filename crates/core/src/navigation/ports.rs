//! Port interfaces for client-side routing

use relay_domain::{NavigationTarget, Result};

/// Trait for the router the navigation helper drives
pub trait Router: Send + Sync {
    /// Full path (path, query and hash) of the current route
    fn current_full_path(&self) -> String;

    /// Resolve a target to the full path it would navigate to
    fn resolve(&self, target: &NavigationTarget) -> Result<String>;

    /// Forward navigation to an already resolved full path (never a replace)
    fn push(&self, full_path: &str) -> Result<()>;
}
