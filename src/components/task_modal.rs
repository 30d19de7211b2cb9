//! Task Editor Modal
//!
//! Create/edit form: title, project, due date, priority. Saving goes
//! through `actions::save_task`; the modal closes when the call completes,
//! whether or not the server accepted it (the list only changes on a
//! confirmed row).

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::actions::{self, Saved};
use crate::context::use_app_context;
use crate::models::Priority;
use crate::store::{store_prepend_task, store_replace_task, use_app_store, AppStateStoreFields};
use crate::supabase::{Supabase, TaskPatch};

#[component]
pub fn TaskModal(editing: Option<Uuid>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let client = expect_context::<Supabase>();

    let projects = store.projects().get_untracked();
    let task = editing.and_then(|id| {
        store
            .tasks()
            .get_untracked()
            .into_iter()
            .find(|t| t.id == id)
    });

    let initial_project = task
        .as_ref()
        .and_then(|t| t.project_id)
        .or_else(|| projects.first().map(|p| p.id));
    let (title, set_title) = signal(task.as_ref().map(|t| t.title.clone()).unwrap_or_default());
    let (project_id, set_project_id) = signal(initial_project);
    let (due_date, set_due_date) = signal(
        task.as_ref()
            .and_then(|t| t.due_date)
            .map(|d| d.to_string())
            .unwrap_or_default(),
    );
    let (priority, set_priority) = signal(task.as_ref().map(|t| t.priority).unwrap_or_default());

    let on_submit = {
        let client = client.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if title.get().trim().is_empty() {
                return;
            }
            let Some(session) = ctx.session.get_untracked() else {
                return;
            };
            let form = TaskPatch {
                title: title.get(),
                project_id: project_id.get(),
                due_date: NaiveDate::parse_from_str(&due_date.get(), "%Y-%m-%d").ok(),
                priority: priority.get(),
            };
            let client = client.clone();
            spawn_local(async move {
                match actions::save_task(&client, &session, form, editing).await {
                    Ok(Some(Saved::Created(task))) => store_prepend_task(&store, task),
                    Ok(Some(Saved::Updated(task))) => store_replace_task(&store, task),
                    Ok(None) | Err(_) => {}
                }
                ctx.close_form();
            });
        }
    };

    let overlay_click = move |_| ctx.close_form();

    view! {
        <div class="modal-overlay active" on:click=overlay_click>
            <div class="modal" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <h2 class="modal-title">
                    {if editing.is_some() { "Edit task" } else { "New task" }}
                </h2>
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label class="form-label">"Title"</label>
                        <input
                            type="text"
                            class="form-input"
                            placeholder="Task title"
                            autofocus=true
                            prop:value=move || title.get()
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label class="form-label">"Project"</label>
                        <select
                            class="form-select"
                            on:change=move |ev| {
                                set_project_id.set(Uuid::parse_str(&event_target_value(&ev)).ok())
                            }
                        >
                            {projects
                                .iter()
                                .map(|p| {
                                    let id = p.id;
                                    view! {
                                        <option
                                            value=id.to_string()
                                            selected=move || project_id.get() == Some(id)
                                        >
                                            {p.name.clone()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label class="form-label">"Due date"</label>
                        <input
                            type="date"
                            class="form-input"
                            prop:value=move || due_date.get()
                            on:input=move |ev| set_due_date.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label class="form-label">"Priority"</label>
                        <select
                            class="form-select"
                            on:change=move |ev| {
                                let parsed = event_target_value(&ev)
                                    .parse::<u8>()
                                    .ok()
                                    .and_then(|raw| Priority::try_from(raw).ok())
                                    .unwrap_or_default();
                                set_priority.set(parsed);
                            }
                        >
                            {Priority::ALL
                                .iter()
                                .map(|&p| {
                                    view! {
                                        <option
                                            value=u8::from(p).to_string()
                                            selected=move || priority.get() == p
                                        >
                                            {p.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="modal-actions">
                        <button type="button" class="btn btn-secondary" on:click=move |_| ctx.close_form()>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">"Save"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
