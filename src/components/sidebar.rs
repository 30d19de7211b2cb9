//! Sidebar Component
//!
//! Date-filter shortcuts, the project list with per-row edit/delete, the
//! add-project action, and sign-out.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::context::{use_app_context, FormState};
use crate::models::FilterMode;
use crate::store::{store_clear, store_remove_project, use_app_store, AppStateStoreFields};
use crate::supabase::Supabase;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let client = expect_context::<Supabase>();

    let logout = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn_local(async move {
                client.sign_out().await;
                store_clear(&store);
                ctx.reset_selection();
            });
        }
    };

    let filter_item = move |mode: FilterMode| {
        let is_active = move || ctx.filter.get() == Some(mode);
        view! {
            <div
                class=move || if is_active() { "nav-item active" } else { "nav-item" }
                on:click=move |_| ctx.select_filter(mode)
            >
                <span class="icon">{mode.icon()}</span>
                {mode.title()}
            </div>
        }
    };

    view! {
        <aside class=move || if ctx.sidebar_open.get() { "sidebar open" } else { "sidebar" }>
            <div class="sidebar-header">
                <div class="logo">
                    <div class="logo-icon">"M"</div>
                    "MyTodoist"
                </div>
                <button class="logout-btn" on:click=logout>"Sign out"</button>
            </div>

            <div class="nav-section">
                {filter_item(FilterMode::Today)}
                {filter_item(FilterMode::Upcoming)}
                {filter_item(FilterMode::All)}
            </div>

            <div class="nav-label">"Projects"</div>
            <div class="nav-section">
                // Key on the mutable fields so renames/recolors re-render
                <For
                    each=move || store.projects().get()
                    key=|project| (project.id, project.name.clone(), project.color.clone())
                    children=move |project| {
                        let id = project.id;
                        let client = client.clone();
                        let is_active = move || ctx.active_project.get() == Some(id);
                        let delete = move |ev: web_sys::MouseEvent| {
                            ev.stop_propagation();
                            let client = client.clone();
                            spawn_local(async move {
                                let id = actions::delete_project(&client, id).await;
                                store_remove_project(&store, id);
                                ctx.project_deleted(id);
                            });
                        };
                        view! {
                            <div
                                class=move || if is_active() { "project-item active" } else { "project-item" }
                                on:click=move |_| ctx.select_project(id)
                            >
                                <span class="project-dot" style=format!("background: {};", project.color)></span>
                                <span class="project-name">{project.name.clone()}</span>
                                <span class="project-actions">
                                    <button
                                        class="project-action-btn edit"
                                        on:click=move |ev: web_sys::MouseEvent| {
                                            ev.stop_propagation();
                                            ctx.open_form(FormState::EditingProject(id));
                                        }
                                    >
                                        "✏️"
                                    </button>
                                    <button class="project-action-btn delete" on:click=delete>
                                        "🗑️"
                                    </button>
                                </span>
                            </div>
                        }
                    }
                />
            </div>

            <div
                class="add-project-btn"
                on:click=move |_| ctx.open_form(FormState::CreatingProject)
            >
                <span class="icon">"+"</span>
                " Add project"
            </div>
        </aside>
    }
}
