//! Auth Screen Component
//!
//! Login/register card with an inline error line — the only error surface
//! in the app. The submit button is disabled while a call is in flight.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::supabase::Supabase;

#[component]
pub fn AuthScreen() -> impl IntoView {
    let client = expect_context::<Supabase>();

    let (is_login, set_is_login) = signal(true);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(String::new());
    let (notice, set_notice) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let on_submit = {
        let client = client.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if submitting.get() {
                return;
            }
            set_error.set(String::new());
            set_notice.set(String::new());
            set_submitting.set(true);

            let client = client.clone();
            let email = email.get();
            let password = password.get();
            let login = is_login.get();
            spawn_local(async move {
                if login {
                    // On success the session listener in App takes over.
                    if let Err(err) = client.sign_in(&email, &password).await {
                        set_error.set(err.to_string());
                    }
                } else {
                    match client.sign_up(&email, &password).await {
                        Ok(()) => {
                            set_notice
                                .set("Registered! Check your email to verify your account.".to_string());
                            set_is_login.set(true);
                        }
                        Err(err) => set_error.set(err.to_string()),
                    }
                }
                set_submitting.set(false);
            });
        }
    };

    let toggle_mode = move |_| {
        set_is_login.update(|v| *v = !*v);
        set_error.set(String::new());
        set_notice.set(String::new());
        set_email.set(String::new());
        set_password.set(String::new());
    };

    view! {
        <div class="auth-container">
            <div class="auth-card">
                <div class="logo">
                    <div class="logo-icon">"M"</div>
                    "MyTodoist"
                </div>
                <h2>{move || if is_login.get() { "Sign in" } else { "Register" }}</h2>
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label class="form-label">"Email"</label>
                        <input
                            type="email"
                            class="form-input"
                            required=true
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label class="form-label">"Password"</label>
                        <input
                            type="password"
                            class="form-input"
                            required=true
                            minlength="6"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <Show when=move || !notice.get().is_empty()>
                        <div class="notice-msg">{move || notice.get()}</div>
                    </Show>
                    <Show when=move || !error.get().is_empty()>
                        <div class="error-msg">{move || error.get()}</div>
                    </Show>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || {
                            if submitting.get() {
                                "Loading…"
                            } else if is_login.get() {
                                "Sign in"
                            } else {
                                "Register"
                            }
                        }}
                    </button>
                </form>
                <p class="auth-switch">
                    {move || if is_login.get() { "No account yet?" } else { "Already registered?" }}
                    <a on:click=toggle_mode>
                        {move || if is_login.get() { "Register" } else { "Sign in" }}
                    </a>
                </p>
            </div>
        </div>
    }
}
