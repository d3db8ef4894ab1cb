//! Project and task mapping between instances
//!
//! Built once per run and read-only afterwards. Each target project is
//! fuzzy-matched against the source project names; an accepted match
//! records a `source id -> target` lookup, then the pair's tasks are
//! matched the same way with their own threshold.

use std::collections::HashMap;

use timebridge_domain::{Project, Task};
use tracing::debug;

use crate::matching;

/// Source-to-target lookup tables for projects and tasks.
#[derive(Debug, Clone, Default)]
pub struct InstanceMappings {
    projects: HashMap<i64, Project>,
    tasks: HashMap<i64, Task>,
}

impl InstanceMappings {
    /// Match target projects, in their given order, against source
    /// projects.
    ///
    /// A target project whose best source candidate scores below
    /// `project_threshold` is dropped; none of its activities will be
    /// reconciled against in this run. Two target projects may match the
    /// same source project - the one processed last wins the table slot.
    /// Never errors; a missing match is simply an absent entry.
    pub fn build(
        source_projects: &[Project],
        target_projects: &[Project],
        project_threshold: f64,
        task_threshold: f64,
    ) -> Self {
        let mut mappings = Self::default();

        for target_project in target_projects {
            let Some((index, score)) = matching::best_match(
                source_projects.iter().map(|project| project.name.as_str()),
                &target_project.name,
                project_threshold,
            ) else {
                debug!(project = %target_project.name, "no source project match");
                continue;
            };

            let source_project = &source_projects[index];
            debug!(
                source = %source_project.name,
                target = %target_project.name,
                score,
                "project matched"
            );
            mappings.projects.insert(source_project.id, target_project.clone());

            for target_task in &target_project.tasks {
                let Some((task_index, _)) = matching::best_match(
                    source_project.tasks.iter().map(|task| task.name.as_str()),
                    &target_task.name,
                    task_threshold,
                ) else {
                    debug!(task = %target_task.name, "no source task match");
                    continue;
                };
                mappings.tasks.insert(source_project.tasks[task_index].id, target_task.clone());
            }
        }

        mappings
    }

    /// Target project for a source project id, if matched.
    pub fn target_project(&self, source_project_id: i64) -> Option<&Project> {
        self.projects.get(&source_project_id)
    }

    /// Target task for a source task id, if matched.
    pub fn target_task(&self, source_task_id: i64) -> Option<&Task> {
        self.tasks.get(&source_task_id)
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: i64, name: &str, tasks: &[(i64, &str)]) -> Project {
        Project {
            id,
            name: name.to_string(),
            tasks: tasks
                .iter()
                .map(|(task_id, task_name)| Task {
                    id: *task_id,
                    name: (*task_name).to_string(),
                    project_id: id,
                })
                .collect(),
        }
    }

    #[test]
    fn maps_matching_projects_and_tasks() {
        let source = vec![project(1, "Website Relaunch", &[(10, "Design"), (11, "Development")])];
        let target = vec![project(101, "Website Relaunch", &[(110, "Design"), (111, "QA")])];

        let mappings = InstanceMappings::build(&source, &target, 0.8, 0.45);

        assert_eq!(mappings.target_project(1).map(|p| p.id), Some(101));
        assert_eq!(mappings.target_task(10).map(|t| t.id), Some(110));
        // "QA" has no close source task, "Development" no close target task
        assert_eq!(mappings.task_count(), 1);
    }

    #[test]
    fn unmatched_target_project_is_absent() {
        // Scenario: target project name matches nothing above threshold
        let source = vec![project(1, "Backend Migration", &[])];
        let target = vec![project(101, "Company Offsite", &[])];

        let mappings = InstanceMappings::build(&source, &target, 0.8, 0.45);

        assert_eq!(mappings.project_count(), 0);
        assert!(mappings.target_project(1).is_none());
    }

    #[test]
    fn duplicate_matches_keep_the_last_target() {
        // Two target projects both match the same source project; the one
        // processed last owns the table slot.
        let source = vec![project(1, "Support", &[])];
        let target = vec![project(101, "Support", &[]), project(102, "Support", &[])];

        let mappings = InstanceMappings::build(&source, &target, 0.8, 0.45);

        assert_eq!(mappings.project_count(), 1);
        assert_eq!(mappings.target_project(1).map(|p| p.id), Some(102));
    }

    #[test]
    fn task_threshold_is_looser_than_project_threshold() {
        let source = vec![project(1, "Website Relaunch", &[(10, "Frontend Development")])];
        let target = vec![project(101, "Website Relaunch", &[(110, "Development")])];

        let mappings = InstanceMappings::build(&source, &target, 0.8, 0.45);

        assert_eq!(mappings.target_task(10).map(|t| t.id), Some(110));
    }
}
