//! Wire representations, decoded once at the API boundary
//!
//! The service nests `project`/`task`/`user`/`customer` objects inside
//! activity payloads; the domain model carries only their ids.

use serde::{Deserialize, Serialize};
use timebridge_domain::{Activity, Project, Task};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EntityRefDto {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TaskDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub project_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProjectDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<TaskDto>,
}

impl ProjectDto {
    pub(crate) fn into_domain(self) -> Project {
        let project_id = self.id;
        Project {
            id: self.id,
            name: self.name,
            tasks: self
                .tasks
                .into_iter()
                .map(|task| Task {
                    id: task.id,
                    name: task.name,
                    project_id: task.project_id.unwrap_or(project_id),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ActivityDto {
    pub id: i64,
    pub date: String,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub billable: bool,
    pub project: EntityRefDto,
    pub task: EntityRefDto,
    #[serde(default)]
    pub user: Option<EntityRefDto>,
    #[serde(default)]
    pub customer: Option<EntityRefDto>,
    #[serde(default)]
    pub remote_id: Option<String>,
}

impl ActivityDto {
    pub(crate) fn into_domain(self) -> Activity {
        Activity {
            id: self.id,
            date: self.date,
            project_id: self.project.id,
            task_id: self.task.id,
            hours: self.hours,
            description: self.description,
            billable: self.billable,
            // the service reports an empty string when no back-reference is set
            remote_id: self.remote_id.filter(|value| !value.is_empty()),
            user_id: self.user.map(|user| user.id),
            customer_id: self.customer.map(|customer| customer.id),
        }
    }
}

/// Write payload for create/update calls. Identity fields (`id`, `user`,
/// `customer`) never travel in the body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ActivityPayload<'a> {
    pub date: &'a str,
    pub project_id: i64,
    pub task_id: i64,
    pub hours: f64,
    pub description: &'a str,
    pub billable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<&'a str>,
}

impl<'a> From<&'a Activity> for ActivityPayload<'a> {
    fn from(activity: &'a Activity) -> Self {
        Self {
            date: &activity.date,
            project_id: activity.project_id,
            task_id: activity.task_id,
            hours: activity.hours,
            description: &activity.description,
            billable: activity.billable,
            remote_id: activity.remote_id.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nested_activity() {
        let json = r#"{
            "id": 982237,
            "date": "2024-01-15",
            "hours": 2.5,
            "description": "Design",
            "billable": true,
            "project": { "id": 944837, "name": "Website Relaunch" },
            "task": { "id": 509111, "name": "Design" },
            "user": { "id": 933, "firstname": "Ada" },
            "customer": { "id": 1444 },
            "remote_id": "42"
        }"#;

        let activity = serde_json::from_str::<ActivityDto>(json).unwrap().into_domain();

        assert_eq!(activity.id, 982237);
        assert_eq!(activity.project_id, 944837);
        assert_eq!(activity.task_id, 509111);
        assert_eq!(activity.user_id, Some(933));
        assert_eq!(activity.customer_id, Some(1444));
        assert_eq!(activity.remote_id.as_deref(), Some("42"));
    }

    #[test]
    fn empty_remote_id_becomes_none() {
        let json = r#"{
            "id": 1,
            "date": "2024-01-15",
            "project": { "id": 2 },
            "task": { "id": 3 },
            "remote_id": ""
        }"#;

        let activity = serde_json::from_str::<ActivityDto>(json).unwrap().into_domain();
        assert!(activity.remote_id.is_none());
        assert_eq!(activity.hours, 0.0);
        assert!(activity.description.is_empty());
    }

    #[test]
    fn project_decode_fills_task_owner() {
        let json = r#"{
            "id": 10,
            "name": "Website Relaunch",
            "tasks": [ { "id": 100, "name": "Design" } ]
        }"#;

        let project = serde_json::from_str::<ProjectDto>(json).unwrap().into_domain();
        assert_eq!(project.tasks[0].project_id, 10);
    }

    #[test]
    fn payload_omits_identity_fields() {
        let activity = Activity {
            id: 7,
            date: "2024-01-15".to_string(),
            project_id: 2,
            task_id: 3,
            hours: 1.0,
            description: "x".to_string(),
            billable: true,
            remote_id: None,
            user_id: Some(9),
            customer_id: Some(8),
        };

        let body = serde_json::to_value(ActivityPayload::from(&activity)).unwrap();
        assert!(body.get("id").is_none());
        assert!(body.get("user_id").is_none());
        assert!(body.get("remote_id").is_none());
        assert_eq!(body["project_id"], 2);
    }
}
