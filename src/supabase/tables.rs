//! Table CRUD
//!
//! Async traits for the two remote collections plus their PostgREST
//! implementation. The traits are the seam the orchestration tests swap an
//! in-memory fake into; every row the app reads or writes passes through
//! them. Rows are always selected with an explicit owner filter — the
//! service enforces the same filter as its authorization boundary.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Priority, Project, Task};

use super::{ApiResult, Supabase};

/// Insert payload for `tasks`. `due_date` is omitted when absent so the
/// column default applies.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub user_id: Uuid,
    pub project_id: Option<Uuid>,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl NewTask {
    /// Promote an editor form into an insert for `user_id`.
    pub fn from_patch(user_id: Uuid, patch: TaskPatch) -> Self {
        Self {
            user_id,
            project_id: patch.project_id,
            title: patch.title,
            completed: false,
            due_date: patch.due_date,
            priority: patch.priority,
        }
    }
}

/// Update payload for `tasks` — the editable fields. `due_date` and
/// `project_id` serialize as explicit nulls so clearing them sticks.
#[derive(Debug, Clone, Serialize)]
pub struct TaskPatch {
    pub title: String,
    pub project_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

#[derive(Serialize)]
struct CompletedPatch {
    completed: bool,
}

/// Insert payload for `projects`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
}

/// Update payload for `projects`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPatch {
    pub name: String,
    pub color: String,
}

#[async_trait(?Send)]
pub trait TasksApi {
    /// All tasks owned by `user_id`, newest first.
    async fn select_tasks(&self, user_id: Uuid) -> ApiResult<Vec<Task>>;
    async fn insert_task(&self, row: &NewTask) -> ApiResult<Task>;
    async fn set_completed(&self, id: Uuid, completed: bool) -> ApiResult<Task>;
    async fn update_task(&self, id: Uuid, patch: &TaskPatch) -> ApiResult<Task>;
    async fn delete_task(&self, id: Uuid) -> ApiResult<()>;
}

#[async_trait(?Send)]
pub trait ProjectsApi {
    /// All projects owned by `user_id`, in creation order.
    async fn select_projects(&self, user_id: Uuid) -> ApiResult<Vec<Project>>;
    async fn insert_project(&self, row: &NewProject) -> ApiResult<Project>;
    async fn update_project(&self, id: Uuid, patch: &ProjectPatch) -> ApiResult<Project>;
    async fn delete_project(&self, id: Uuid) -> ApiResult<()>;
}

#[async_trait(?Send)]
impl TasksApi for Supabase {
    async fn select_tasks(&self, user_id: Uuid) -> ApiResult<Vec<Task>> {
        let query = format!("user_id=eq.{}&select=*&order=created_at.desc", user_id);
        self.get_rows("tasks", &query).await
    }

    async fn insert_task(&self, row: &NewTask) -> ApiResult<Task> {
        self.insert_row("tasks", row).await
    }

    async fn set_completed(&self, id: Uuid, completed: bool) -> ApiResult<Task> {
        self.patch_row("tasks", id, &CompletedPatch { completed }).await
    }

    async fn update_task(&self, id: Uuid, patch: &TaskPatch) -> ApiResult<Task> {
        self.patch_row("tasks", id, patch).await
    }

    async fn delete_task(&self, id: Uuid) -> ApiResult<()> {
        self.delete_row("tasks", id).await
    }
}

#[async_trait(?Send)]
impl ProjectsApi for Supabase {
    async fn select_projects(&self, user_id: Uuid) -> ApiResult<Vec<Project>> {
        let query = format!("user_id=eq.{}&select=*&order=created_at.asc", user_id);
        self.get_rows("projects", &query).await
    }

    async fn insert_project(&self, row: &NewProject) -> ApiResult<Project> {
        self.insert_row("projects", row).await
    }

    async fn update_project(&self, id: Uuid, patch: &ProjectPatch) -> ApiResult<Project> {
        self.patch_row("projects", id, patch).await
    }

    async fn delete_project(&self, id: Uuid) -> ApiResult<()> {
        self.delete_row("projects", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_omits_absent_due_date() {
        let row = NewTask {
            user_id: Uuid::from_u128(1),
            project_id: None,
            title: "Water plants".to_string(),
            completed: false,
            due_date: None,
            priority: Priority::Low,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("due_date").is_none());
        assert_eq!(json["priority"], 4);
        assert_eq!(json["project_id"], serde_json::Value::Null);
    }

    #[test]
    fn task_patch_sends_explicit_null_to_clear_due_date() {
        let patch = TaskPatch {
            title: "Water plants".to_string(),
            project_id: Some(Uuid::from_u128(2)),
            due_date: None,
            priority: Priority::High,
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["due_date"], serde_json::Value::Null);
        assert_eq!(json["priority"], 2);
    }

    #[test]
    fn insert_from_form_starts_open() {
        let patch = TaskPatch {
            title: "Call dentist".to_string(),
            project_id: None,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 16),
            priority: Priority::Medium,
        };
        let row = NewTask::from_patch(Uuid::from_u128(9), patch);
        assert!(!row.completed);
        assert_eq!(row.user_id, Uuid::from_u128(9));
        assert_eq!(row.due_date, NaiveDate::from_ymd_opt(2024, 6, 16));
    }
}
