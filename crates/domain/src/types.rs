//! Typed records for the remote time-tracking service
//!
//! Remote entities are decoded once at the API boundary into this closed
//! set of types; nested `project`/`task`/`user`/`customer` objects on the
//! wire are flattened to ids here. Source and target instances use
//! disjoint id spaces, so an id is only meaningful together with the
//! instance it came from.

use serde::{Deserialize, Serialize};

/// A task within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
}

/// A project with its assigned tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A time entry.
///
/// `date` is kept in canonical `YYYY-MM-DD` form once grouped; values
/// the grouper cannot parse keep their original form. `remote_id` is the
/// cross-instance back-reference: on a target-side entry it holds the id
/// of the source entry it was created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub date: String,
    pub project_id: i64,
    pub task_id: i64,
    pub hours: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub billable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
}

/// Server-side filters for activity and project listings.
///
/// Filter semantics belong to the remote service; this type only carries
/// them to the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFilters {
    /// Start date (`YYYY-MM-DD`), inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// End date (`YYYY-MM-DD`), inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    /// Free-text search term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

impl ActivityFilters {
    /// True when no filter is set.
    pub fn is_empty(&self) -> bool {
        self.from.is_none()
            && self.to.is_none()
            && self.project_id.is_none()
            && self.company_id.is_none()
            && self.term.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_are_empty() {
        assert!(ActivityFilters::default().is_empty());
        assert!(!ActivityFilters { project_id: Some(1), ..Default::default() }.is_empty());
    }
}
