//! Application Context
//!
//! Session, sidebar selection, and modal state as one explicit context
//! value provided at the application root. Selection rules (filter and
//! project are mutually exclusive views) live here as methods instead of
//! being scattered over raw signal writes.

use leptos::prelude::*;
use uuid::Uuid;

use crate::models::{FilterMode, Session};

/// Which modal form is open, if any. Editing states carry the row id so a
/// modal can never be open "for editing" without a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    CreatingTask,
    EditingTask(Uuid),
    CreatingProject,
    EditingProject(Uuid),
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current auth session; `None` renders the auth screen.
    pub session: RwSignal<Option<Session>>,
    /// Active date-window filter. Cleared when a project is selected.
    pub filter: RwSignal<Option<FilterMode>>,
    /// Active project scope. Cleared when a filter is selected.
    pub active_project: RwSignal<Option<Uuid>>,
    /// Modal form state.
    pub form: RwSignal<FormState>,
    /// Sidebar visibility on narrow layouts.
    pub sidebar_open: RwSignal<bool>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(None),
            filter: RwSignal::new(Some(FilterMode::Today)),
            active_project: RwSignal::new(None),
            form: RwSignal::new(FormState::Closed),
            sidebar_open: RwSignal::new(false),
        }
    }

    /// Switch to a date-window view; drops any project scope.
    pub fn select_filter(&self, mode: FilterMode) {
        self.filter.set(Some(mode));
        self.active_project.set(None);
        self.sidebar_open.set(false);
    }

    /// Switch to a project view; drops the date-window filter.
    pub fn select_project(&self, id: Uuid) {
        self.active_project.set(Some(id));
        self.filter.set(None);
        self.sidebar_open.set(false);
    }

    /// A project was deleted: a selection pointing at it is cleared.
    pub fn project_deleted(&self, id: Uuid) {
        let next = selection_after_delete(self.active_project.get_untracked(), id);
        if next != self.active_project.get_untracked() {
            self.active_project.set(next);
        }
    }

    /// Back to the defaults used on sign-in: "Today", no project scope.
    pub fn reset_selection(&self) {
        self.filter.set(Some(FilterMode::Today));
        self.active_project.set(None);
    }

    pub fn open_form(&self, state: FormState) {
        self.form.set(state);
    }

    pub fn close_form(&self) {
        self.form.set(FormState::Closed);
    }
}

/// Get the app context from context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// The active-project selection after deleting `deleted`: a selection
/// pointing at the deleted project is cleared, any other survives.
fn selection_after_delete(active: Option<Uuid>, deleted: Uuid) -> Option<Uuid> {
    if active == Some(deleted) {
        None
    } else {
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleting_the_active_project_clears_the_selection() {
        let active = Some(Uuid::from_u128(1));
        assert_eq!(selection_after_delete(active, Uuid::from_u128(1)), None);
    }

    #[test]
    fn deleting_another_project_keeps_the_selection() {
        let active = Some(Uuid::from_u128(1));
        assert_eq!(selection_after_delete(active, Uuid::from_u128(2)), active);
        assert_eq!(selection_after_delete(None, Uuid::from_u128(2)), None);
    }
}
