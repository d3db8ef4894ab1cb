//! Instance catalog loader
//!
//! Loads the catalog of known instances from a TOML file.
//!
//! ## Loading Strategy
//! 1. `TIMEBRIDGE_CONFIG`, if set, names the file explicitly
//! 2. Otherwise `./timebridge.toml` then `./config.toml` are probed
//! 3. Per-instance API keys can be overridden via environment variables
//!
//! ## File format
//! ```toml
//! [instances.acme-a]
//! base_url = "https://acme-a.example.com/api/v1"
//! api_key = "..."
//!
//! [instances.acme-b]
//! base_url = "https://acme-b.example.com/api/v1"
//! api_key = "..."
//! ```
//!
//! ## Environment Variables
//! - `TIMEBRIDGE_CONFIG`: explicit config file path
//! - `TIMEBRIDGE_API_KEY_<NAME>`: api key override for instance `<NAME>`
//!   (name uppercased, `-` replaced by `_`)

use std::path::{Path, PathBuf};

use timebridge_domain::{Config, Result, TimebridgeError};

/// Config file names probed in the working directory, in order.
const PROBE_FILES: &[&str] = &["timebridge.toml", "config.toml"];

/// Load the instance catalog with the automatic fallback strategy.
///
/// # Errors
/// Returns `TimebridgeError::Config` if no file is found, the file
/// cannot be read, or its contents are not valid TOML.
pub fn load() -> Result<Config> {
    match std::env::var("TIMEBRIDGE_CONFIG") {
        Ok(path) => load_from_file(Some(PathBuf::from(path))),
        Err(_) => load_from_file(None),
    }
}

/// Load the instance catalog from a specific file, or probe for one.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => probe_config_paths().ok_or_else(|| {
            TimebridgeError::Config(format!(
                "no config file found (looked for {})",
                PROBE_FILES.join(", ")
            ))
        })?,
    };

    let raw = std::fs::read_to_string(&path).map_err(|err| {
        TimebridgeError::Config(format!("cannot read {}: {}", path.display(), err))
    })?;
    let mut config: Config = toml::from_str(&raw).map_err(|err| {
        TimebridgeError::Config(format!("invalid config {}: {}", path.display(), err))
    })?;

    apply_env_overrides(&mut config);
    tracing::info!(
        path = %path.display(),
        instances = config.instances.len(),
        "configuration loaded"
    );
    Ok(config)
}

/// First existing probe path, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    PROBE_FILES
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .map(Path::to_path_buf)
}

fn apply_env_overrides(config: &mut Config) {
    for (name, instance) in &mut config.instances {
        let variable = format!(
            "TIMEBRIDGE_API_KEY_{}",
            name.to_uppercase().replace('-', "_")
        );
        if let Ok(key) = std::env::var(&variable) {
            tracing::debug!(instance = %name, "api key taken from environment");
            instance.api_key = key;
        }
    }
}
