//! Application Shell
//!
//! Builds the client, store, and context; restores any persisted session;
//! subscribes to session changes for the application lifetime; and switches
//! between the loading splash, the auth screen, and the main layout.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use uuid::Uuid;

use crate::actions;
use crate::components::{AuthScreen, ProjectModal, Sidebar, TaskList, TaskModal};
use crate::context::{use_app_context, AppContext, FormState};
use crate::models::{FilterMode, Project};
use crate::store::{
    store_load, store_prepend_task, use_app_store, AppState, AppStateStoreFields, AppStore,
};
use crate::supabase::Supabase;

#[component]
pub fn App() -> impl IntoView {
    let client = Supabase::from_env();
    let store = Store::new(AppState::default());
    let ctx = AppContext::new();
    provide_context(client.clone());
    provide_context(store);
    provide_context(ctx);

    let (booting, set_booting) = signal(true);

    // Restore a persisted session, then pull that user's workspace.
    {
        let client = client.clone();
        spawn_local(async move {
            if let Some(session) = client.current_session() {
                ctx.session.set(Some(session.clone()));
                load_into_store(&client, store, session.user.id).await;
            }
            set_booting.set(false);
        });
    }

    // Session-change notifications: sign-in and sign-out from anywhere in
    // the app. Deregistered when the application unmounts.
    let subscription = client.on_auth_state_change({
        let client = client.clone();
        move |session| {
            ctx.session.set(session.clone());
            if let Some(session) = session {
                let client = client.clone();
                spawn_local(async move {
                    load_into_store(&client, store, session.user.id).await;
                });
            }
        }
    });
    on_cleanup(move || subscription.unsubscribe());

    view! {
        {move || {
            if booting.get() {
                view! { <div class="loading">"Loading…"</div> }.into_any()
            } else if ctx.session.get().is_none() {
                view! { <AuthScreen /> }.into_any()
            } else {
                view! { <MainScreen /> }.into_any()
            }
        }}
    }
}

async fn load_into_store(client: &Supabase, store: AppStore, user_id: Uuid) {
    let (projects, tasks) = actions::load_workspace(client, user_id).await;
    web_sys::console::log_1(
        &format!("[app] loaded {} projects, {} tasks", projects.len(), tasks.len()).into(),
    );
    store_load(&store, projects, tasks);
}

/// Sidebar + task list + whichever modal the form state calls for.
#[component]
fn MainScreen() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let client = expect_context::<Supabase>();

    let (quick_title, set_quick_title) = signal(String::new());

    let quick_add = {
        let client = client.clone();
        move |ev: web_sys::KeyboardEvent| {
            if ev.key() != "Enter" {
                return;
            }
            ev.prevent_default();
            let Some(session) = ctx.session.get_untracked() else {
                return;
            };
            let title = quick_title.get();
            let client = client.clone();
            spawn_local(async move {
                let projects = store.projects().get_untracked();
                let active = ctx.active_project.get_untracked();
                match actions::add_task(&client, &session, &projects, active, &title).await {
                    Ok(Some(task)) => {
                        store_prepend_task(&store, task);
                        set_quick_title.set(String::new());
                    }
                    Ok(None) | Err(_) => {}
                }
            });
        }
    };

    let title = move || page_title(ctx.filter.get(), ctx.active_project.get(), &store.projects().get());

    view! {
        <div class="app">
            <Sidebar />
            <main class="main-content">
                <div class="main-header">
                    <button
                        class="menu-toggle"
                        on:click=move |_| ctx.sidebar_open.update(|open| *open = !*open)
                    >
                        "☰"
                    </button>
                    <h1 class="page-title">
                        {move || {
                            let (icon, _) = title();
                            (!icon.is_empty()).then(|| view! { <span>{icon}</span> })
                        }}
                        {move || title().1}
                    </h1>
                </div>

                <div class="add-task-section">
                    <input
                        type="text"
                        class="add-task-input"
                        placeholder="Add a task…"
                        prop:value=move || quick_title.get()
                        on:input=move |ev| set_quick_title.set(event_target_value(&ev))
                        on:keydown=quick_add
                    />
                </div>

                <TaskList />
            </main>

            {move || match ctx.form.get() {
                FormState::CreatingTask => view! { <TaskModal editing=None /> }.into_any(),
                FormState::EditingTask(id) => view! { <TaskModal editing=Some(id) /> }.into_any(),
                FormState::CreatingProject => view! { <ProjectModal editing=None /> }.into_any(),
                FormState::EditingProject(id) => {
                    view! { <ProjectModal editing=Some(id) /> }.into_any()
                }
                FormState::Closed => view! { <div></div> }.into_any(),
            }}
        </div>
    }
}

/// Header icon and text for the current selection. A project selection that
/// no longer resolves renders an empty title.
fn page_title(
    filter: Option<FilterMode>,
    active_project: Option<Uuid>,
    projects: &[Project],
) -> (&'static str, String) {
    if let Some(mode) = filter {
        return (mode.icon(), mode.title().to_string());
    }
    let name = active_project
        .and_then(|id| projects.iter().find(|p| p.id == id))
        .map(|p| p.name.clone())
        .unwrap_or_default();
    ("", name)
}
