//! Configuration structures

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PROJECT_MATCH_THRESHOLD, DEFAULT_TASK_MATCH_THRESHOLD};
use crate::types::ActivityFilters;

/// Options controlling one reconciliation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Acceptance threshold for project name matching (0.0 - 1.0).
    pub project_match_threshold: f64,
    /// Acceptance threshold for task name matching (0.0 - 1.0).
    pub task_match_threshold: f64,
    /// Filters applied when listing source-side projects and activities.
    #[serde(default)]
    pub source_filters: ActivityFilters,
    /// Filters applied when listing target-side projects and activities.
    #[serde(default)]
    pub target_filters: ActivityFilters,
    /// Compute and report classifications without writing.
    #[serde(default)]
    pub dry_run: bool,
    /// Verbose tracing only; no behavioral effect.
    #[serde(default)]
    pub debug: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            project_match_threshold: DEFAULT_PROJECT_MATCH_THRESHOLD,
            task_match_threshold: DEFAULT_TASK_MATCH_THRESHOLD,
            source_filters: ActivityFilters::default(),
            target_filters: ActivityFilters::default(),
            dry_run: false,
            debug: false,
        }
    }
}

/// Connection settings for one instance of the time-tracking service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// API base URL, e.g. `https://acme.example.com/api/v1`.
    pub base_url: String,
    pub api_key: String,
}

/// Catalog of known instances, keyed by the name used on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub instances: BTreeMap<String, InstanceConfig>,
}

impl Config {
    /// Look up an instance by its catalog name.
    pub fn instance(&self, name: &str) -> Option<&InstanceConfig> {
        self.instances.get(name)
    }
}
