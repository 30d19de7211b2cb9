//! Global Application State Store
//!
//! In-memory mirror of the signed-in user's two remote collections, held in
//! a Leptos reactive store for fine-grained updates. The store only ever
//! holds rows confirmed by the server (except deletes, which are applied
//! unconditionally — see `actions`). Everything is discarded on sign-out.

use leptos::prelude::*;
use reactive_stores::Store;
use uuid::Uuid;

use crate::models::{Project, Row, Task};

/// Collections for the current user.
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Projects in creation order.
    pub projects: Vec<Project>,
    /// Tasks newest-first (server order).
    pub tasks: Vec<Task>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Swap in an updated row by id, leaving the rest of the list untouched.
/// Unknown ids are ignored.
pub fn replace_row<T: Row>(rows: &mut Vec<T>, updated: T) {
    if let Some(slot) = rows.iter_mut().find(|row| row.id() == updated.id()) {
        *slot = updated;
    }
}

/// Drop a row by id. Unknown ids are ignored.
pub fn remove_row<T: Row>(rows: &mut Vec<T>, id: Uuid) {
    rows.retain(|row| row.id() != id);
}

// ========================
// Store Helper Functions
// ========================

/// Replace both collections after a bulk load.
pub fn store_load(store: &AppStore, projects: Vec<Project>, tasks: Vec<Task>) {
    *store.projects().write() = projects;
    *store.tasks().write() = tasks;
}

/// Drop everything (sign-out).
pub fn store_clear(store: &AppStore) {
    store.projects().write().clear();
    store.tasks().write().clear();
}

/// Newly created tasks go to the front, matching newest-first order.
pub fn store_prepend_task(store: &AppStore, task: Task) {
    store.tasks().write().insert(0, task);
}

pub fn store_replace_task(store: &AppStore, task: Task) {
    replace_row(&mut store.tasks().write(), task);
}

pub fn store_remove_task(store: &AppStore, id: Uuid) {
    remove_row(&mut store.tasks().write(), id);
}

/// Newly created projects go to the back, matching creation order.
pub fn store_append_project(store: &AppStore, project: Project) {
    store.projects().write().push(project);
}

pub fn store_replace_project(store: &AppStore, project: Project) {
    replace_row(&mut store.projects().write(), project);
}

pub fn store_remove_project(store: &AppStore, id: Uuid) {
    remove_row(&mut store.projects().write(), id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{TimeZone, Utc};

    fn task(id: u128, title: &str) -> Task {
        Task {
            id: Uuid::from_u128(id),
            user_id: Uuid::from_u128(0xA0),
            project_id: None,
            title: title.to_string(),
            completed: false,
            due_date: None,
            priority: Priority::Low,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn replace_swaps_matching_row_only() {
        let mut tasks = vec![task(1, "one"), task(2, "two")];
        replace_row(&mut tasks, task(2, "two, edited"));
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "one");
        assert_eq!(tasks[1].title, "two, edited");
    }

    #[test]
    fn replace_ignores_unknown_id() {
        let mut tasks = vec![task(1, "one")];
        replace_row(&mut tasks, task(9, "ghost"));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "one");
    }

    #[test]
    fn remove_drops_matching_row_only() {
        let mut tasks = vec![task(1, "one"), task(2, "two")];
        remove_row(&mut tasks, Uuid::from_u128(1));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "two");

        remove_row(&mut tasks, Uuid::from_u128(42));
        assert_eq!(tasks.len(), 1);
    }
}
