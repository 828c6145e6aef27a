//! Configuration loading and management
//!
//! This module provides utilities for loading application configuration
//! from environment variables, `.env` files and config files.

pub mod loader;

// Re-export commonly used items
pub use loader::{
    load, load_env_files, load_env_files_from, load_from_env, load_from_file, load_with_source,
    probe_config_paths, ConfigSource,
};
