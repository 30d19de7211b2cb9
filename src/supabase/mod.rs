//! Remote Service Client
//!
//! Thin typed client for the backend-as-a-service: GoTrue-style auth plus
//! PostgREST-style table CRUD. Shared HTTP plumbing lives here; the auth
//! lifecycle and the per-table APIs are in the submodules.

mod auth;
mod tables;

pub use auth::AuthSubscription;
pub use tables::{NewProject, NewTask, ProjectPatch, ProjectsApi, TaskPatch, TasksApi};

use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::{Request, RequestBuilder, Response};
use send_wrapper::SendWrapper;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use auth::AuthState;

/// Errors crossing the remote-service boundary.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Sign-in/sign-up rejected; the message is shown to the user verbatim.
    #[error("{0}")]
    Auth(String),
    #[error("request failed: {0}")]
    Http(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Client handle. Cheap to clone; all clones share session state and
/// auth-change listeners.
#[derive(Clone)]
pub struct Supabase {
    base_url: String,
    anon_key: String,
    state: SendWrapper<Rc<RefCell<AuthState>>>,
}

impl Supabase {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            state: SendWrapper::new(Rc::new(RefCell::new(AuthState::default()))),
        }
    }

    /// Build from compile-time configuration. The placeholder defaults keep
    /// unconfigured builds compiling; requests against them fail at runtime.
    pub fn from_env() -> Self {
        Self::new(
            option_env!("MYTODOIST_SUPABASE_URL").unwrap_or("http://localhost:54321"),
            option_env!("MYTODOIST_SUPABASE_KEY").unwrap_or("public-anon-key"),
        )
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Bearer token: the session token when signed in, the anon key otherwise.
    fn bearer(&self) -> String {
        let token = self
            .state
            .borrow()
            .session
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.anon_key.clone());
        format!("Bearer {}", token)
    }

    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &self.bearer())
    }

    pub(crate) async fn get_rows<T: DeserializeOwned>(&self, table: &str, query: &str) -> ApiResult<Vec<T>> {
        let url = format!("{}?{}", self.table_url(table), query);
        let response = self
            .with_headers(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        decode_json(response).await
    }

    /// POST a row and return the server's representation of it.
    pub(crate) async fn insert_row<T, B>(&self, table: &str, row: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = self
            .with_headers(Request::post(&self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(row)
            .map_err(|e| ApiError::Http(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        single(decode_json(response).await?)
    }

    /// PATCH one row by id and return the updated representation.
    pub(crate) async fn patch_row<T, B>(&self, table: &str, id: Uuid, patch: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{}?id=eq.{}", self.table_url(table), id);
        let request = self
            .with_headers(Request::patch(&url))
            .header("Prefer", "return=representation")
            .json(patch)
            .map_err(|e| ApiError::Http(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        single(decode_json(response).await?)
    }

    pub(crate) async fn delete_row(&self, table: &str, id: Uuid) -> ApiResult<()> {
        let url = format!("{}?id=eq.{}", self.table_url(table), id);
        let response = self
            .with_headers(Request::delete(&url))
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        if response.ok() {
            Ok(())
        } else {
            Err(status_error(response).await)
        }
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if !response.ok() {
        return Err(status_error(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::Status {
        status,
        message: error_message(&body).unwrap_or(body),
    }
}

/// Mine an error body for its human-readable message. GoTrue and PostgREST
/// disagree on the field name.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["error_description", "msg", "message", "error"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }
    None
}

/// PostgREST representations come back as a one-element array.
fn single<T>(mut rows: Vec<T>) -> ApiResult<T> {
    if rows.is_empty() {
        return Err(ApiError::Decode("empty representation".to_string()));
    }
    Ok(rows.swap_remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_reads_gotrue_and_postgrest_shapes() {
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            Some("Invalid login credentials".to_string())
        );
        assert_eq!(
            error_message(r#"{"msg":"Email not confirmed"}"#),
            Some("Email not confirmed".to_string())
        );
        assert_eq!(
            error_message(r#"{"message":"permission denied for table tasks"}"#),
            Some("permission denied for table tasks".to_string())
        );
        assert_eq!(error_message("not json"), None);
    }

    #[test]
    fn single_takes_the_first_row() {
        assert_eq!(single(vec![7, 8]).unwrap(), 7);
        assert!(single::<u8>(vec![]).is_err());
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = Supabase::new("https://example.supabase.co/", "key");
        assert_eq!(client.table_url("tasks"), "https://example.supabase.co/rest/v1/tasks");
        assert_eq!(client.auth_url("signup"), "https://example.supabase.co/auth/v1/signup");
    }
}
