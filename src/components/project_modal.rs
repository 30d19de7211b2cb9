//! Project Editor Modal
//!
//! Create/edit form: name plus a fixed 8-swatch color picker.

use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::actions::{self, Saved};
use crate::context::use_app_context;
use crate::store::{store_append_project, store_replace_project, use_app_store, AppStateStoreFields};
use crate::supabase::Supabase;

/// Fixed palette offered by the swatch picker.
pub const PROJECT_COLORS: [&str; 8] = [
    "#e44145", "#ff9f43", "#feca57", "#10b981", "#54a0ff", "#5f27cd", "#ff6b6b", "#c8d6e5",
];

#[component]
pub fn ProjectModal(editing: Option<Uuid>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let client = expect_context::<Supabase>();

    let project = editing.and_then(|id| {
        store
            .projects()
            .get_untracked()
            .into_iter()
            .find(|p| p.id == id)
    });

    let (name, set_name) = signal(project.as_ref().map(|p| p.name.clone()).unwrap_or_default());
    let (color, set_color) = signal(
        project
            .as_ref()
            .map(|p| p.color.clone())
            .unwrap_or_else(|| PROJECT_COLORS[0].to_string()),
    );

    let on_submit = {
        let client = client.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if name.get().trim().is_empty() {
                return;
            }
            let Some(session) = ctx.session.get_untracked() else {
                return;
            };
            let client = client.clone();
            let name = name.get();
            let color = color.get();
            spawn_local(async move {
                match actions::save_project(&client, &session, &name, &color, editing).await {
                    Ok(Some(Saved::Created(project))) => store_append_project(&store, project),
                    Ok(Some(Saved::Updated(project))) => store_replace_project(&store, project),
                    Ok(None) | Err(_) => {}
                }
                ctx.close_form();
            });
        }
    };

    view! {
        <div class="modal-overlay active" on:click=move |_| ctx.close_form()>
            <div class="modal" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <h2 class="modal-title">
                    {if editing.is_some() { "Edit project" } else { "New project" }}
                </h2>
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label class="form-label">"Name"</label>
                        <input
                            type="text"
                            class="form-input"
                            placeholder="Project name"
                            autofocus=true
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label class="form-label">"Color"</label>
                        <div class="color-picker">
                            {PROJECT_COLORS
                                .iter()
                                .map(|&swatch| {
                                    let is_selected = move || color.get() == swatch;
                                    view! {
                                        <div
                                            class=move || {
                                                if is_selected() {
                                                    "color-option selected"
                                                } else {
                                                    "color-option"
                                                }
                                            }
                                            style=format!("background: {};", swatch)
                                            on:click=move |_| set_color.set(swatch.to_string())
                                        ></div>
                                    }
                                })
                                .collect_view()}
                        </div>
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
