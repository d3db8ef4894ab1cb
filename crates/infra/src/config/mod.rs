//! Configuration loading and management

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_file, probe_config_paths};
