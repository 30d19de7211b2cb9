//! Task List Component
//!
//! Renders the visible tasks for the current selection: checkbox, priority
//! dot, title, project label, due-date label, edit/delete actions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::context::{use_app_context, FormState};
use crate::dates;
use crate::filter::visible_tasks;
use crate::models::Task;
use crate::store::{store_remove_task, store_replace_task, use_app_store, AppStateStoreFields};
use crate::supabase::Supabase;

#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let client = expect_context::<Supabase>();

    // Recomputed on every change with a fresh "today": classification is
    // time-dependent and must not be cached.
    let visible = move || {
        visible_tasks(
            &store.tasks().get(),
            ctx.filter.get(),
            ctx.active_project.get(),
            dates::today(),
        )
    };

    view! {
        <div class="task-list">
            // Key on every mutable field so edits re-render the row
            <For
                each=visible
                key=|task| {
                    (
                        task.id,
                        task.title.clone(),
                        task.completed,
                        task.due_date,
                        task.priority,
                        task.project_id,
                    )
                }
                children=move |task| {
                    let client = client.clone();
                    view! { <TaskRow task=task client=client /> }
                }
            />
        </div>
    }
}

#[component]
fn TaskRow(task: Task, client: Supabase) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = task.id;
    let project_id = task.project_id;
    let completed = task.completed;
    let due = task.due_date;
    let priority = task.priority;
    let title = task.title.clone();

    let toggle = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            let task = task.clone();
            spawn_local(async move {
                if let Ok(updated) = actions::toggle_task(&client, &task).await {
                    store_replace_task(&store, updated);
                }
            });
        }
    };

    let delete = move |_| {
        let client = client.clone();
        spawn_local(async move {
            let id = actions::delete_task(&client, id).await;
            store_remove_task(&store, id);
        });
    };

    // Dangling project references (deleted project) simply render no label.
    let project_label = move || {
        store
            .projects()
            .get()
            .into_iter()
            .find(|p| Some(p.id) == project_id)
            .map(|p| {
                view! {
                    <span
                        class="task-project-label"
                        style=format!("background: {}33; color: {};", p.color, p.color)
                    >
                        {p.name}
                    </span>
                }
            })
    };

    let date_label = move || {
        due.map(|due| {
            let today = dates::today();
            let class = if due == today {
                "task-date today"
            } else if dates::is_overdue(Some(due), today) {
                "task-date overdue"
            } else {
                "task-date"
            };
            view! { <span class=class>{dates::due_label(due, today)}</span> }
        })
    };

    view! {
        <div class=move || if completed { "task-item completed" } else { "task-item" }>
            <div class="task-checkbox" on:click=toggle></div>
            <div class=format!("priority-dot priority-{}", u8::from(priority))></div>
            <span class="task-text">{title}</span>
            {project_label}
            {date_label}
            <div class="task-actions">
                <button
                    class="task-action-btn edit"
                    on:click=move |_| ctx.open_form(FormState::EditingTask(id))
                >
                    "✏️"
                </button>
                <button class="task-action-btn delete" on:click=delete>"🗑️"</button>
            </div>
        </div>
    }
}
