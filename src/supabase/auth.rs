//! Auth Session Lifecycle
//!
//! Password sign-in/sign-up/sign-out against the GoTrue endpoints, session
//! persistence in `localStorage`, and an explicit subscribe/unsubscribe
//! registry for session-change notifications.

use std::rc::{Rc, Weak};

use gloo_net::http::Request;
use send_wrapper::SendWrapper;
use serde::{Deserialize, Serialize};

use crate::models::Session;

use super::{ApiError, ApiResult, Supabase};

const SESSION_STORAGE_KEY: &str = "mytodoist.session";

type Listener = Rc<dyn Fn(Option<Session>)>;

#[derive(Default)]
pub(super) struct AuthState {
    pub(super) session: Option<Session>,
    /// Set once the persisted session has been looked up.
    restored: bool,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

/// Handle returned by [`Supabase::on_auth_state_change`]. Dropping it keeps
/// the listener alive; call [`unsubscribe`](AuthSubscription::unsubscribe)
/// on teardown.
pub struct AuthSubscription {
    id: u64,
    state: SendWrapper<Weak<std::cell::RefCell<AuthState>>>,
}

impl AuthSubscription {
    pub fn unsubscribe(self) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Password-grant token response. Only the fields this client consumes.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: crate::models::User,
}

impl Supabase {
    /// The session restored from storage or established by a sign-in, if any.
    pub fn current_session(&self) -> Option<Session> {
        {
            let mut state = self.state.borrow_mut();
            if !state.restored {
                state.restored = true;
                if state.session.is_none() {
                    state.session = load_persisted_session();
                }
            }
        }
        self.state.borrow().session.clone()
    }

    /// Register a callback for session changes (sign-in, sign-out). The
    /// callback fires with the new session, `None` on sign-out.
    pub fn on_auth_state_change(
        &self,
        listener: impl Fn(Option<Session>) + 'static,
    ) -> AuthSubscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        state.listeners.push((id, Rc::new(listener)));
        AuthSubscription {
            id,
            state: SendWrapper::new(Rc::downgrade(&self.state)),
        }
    }

    fn set_session(&self, session: Option<Session>) {
        {
            let mut state = self.state.borrow_mut();
            state.restored = true;
            state.session = session.clone();
        }
        persist_session(session.as_ref());
        // Clone the listener list out so a callback may subscribe/unsubscribe
        // without hitting the RefCell.
        let listeners: Vec<Listener> = self
            .state
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(session.clone());
        }
    }

    /// Exchange email/password for a session. On success the session is
    /// stored, persisted, and announced to listeners.
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<Session> {
        let url = format!("{}?grant_type=password", self.auth_url("token"));
        let request = Request::post(&url)
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .map_err(|e| ApiError::Http(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        if !response.ok() {
            return Err(auth_error(response).await);
        }
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let session = Session {
            access_token: token.access_token,
            user: token.user,
        };
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Create an account. No session is established: the service requires
    /// email verification before the first sign-in.
    pub async fn sign_up(&self, email: &str, password: &str) -> ApiResult<()> {
        let request = Request::post(&self.auth_url("signup"))
            .header("apikey", &self.anon_key)
            .json(&Credentials { email, password })
            .map_err(|e| ApiError::Http(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        if !response.ok() {
            return Err(auth_error(response).await);
        }
        Ok(())
    }

    /// Revoke the session remotely (failure ignored), then drop it locally
    /// and notify listeners.
    pub async fn sign_out(&self) {
        let token = self
            .state
            .borrow()
            .session
            .as_ref()
            .map(|s| s.access_token.clone());
        if let Some(token) = token {
            let _ = Request::post(&self.auth_url("logout"))
                .header("apikey", &self.anon_key)
                .header("Authorization", &format!("Bearer {}", token))
                .send()
                .await;
        }
        self.set_session(None);
    }
}

async fn auth_error(response: gloo_net::http::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = super::error_message(&body)
        .unwrap_or_else(|| format!("authentication failed (HTTP {})", status));
    ApiError::Auth(message)
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

fn persist_session(session: Option<&Session>) {
    let Some(storage) = local_storage() else {
        return;
    };
    match session {
        Some(session) => {
            if let Ok(json) = serde_json::to_string(session) {
                let _ = storage.set_item(SESSION_STORAGE_KEY, &json);
            }
        }
        None => {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

fn load_persisted_session() -> Option<Session> {
    let storage = local_storage()?;
    let json = storage.get_item(SESSION_STORAGE_KEY).ok()??;
    serde_json::from_str(&json).ok()
}
