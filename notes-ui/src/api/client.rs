//! HTTP API Client
//!
//! [`GlooBackend`] talks to the notes backend with `gloo-net`.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use notes_assistant::backend::dto::{
    AssistRequest, AssistResponse, CorrectionRequest, CorrectionResponse, CreateNoteRequest,
    CredentialsRequest, LoginResponse, WelcomeResponse,
};
use notes_assistant::backend::{endpoint, paths};
use notes_assistant::{
    AssistMode, BackendError, BearerToken, Credentials, Note, NoteDraft, NotesBackend,
    DEFAULT_BASE_URL,
};

const API_URL_KEY: &str = "notes_api_url";

/// Trim whitespace and trailing slashes, falling back to the default
pub fn normalize_base(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        url.to_string()
    }
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten());
    normalize_base(stored.as_deref().unwrap_or(DEFAULT_BASE_URL))
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, &normalize_base(url));
        }
    }
}

/// Backend reached through the browser's `fetch`
#[derive(Debug, Clone)]
pub struct GlooBackend {
    base_url: String,
}

impl GlooBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base(base_url),
        }
    }

    /// Backend at the stored (or default) URL
    pub fn from_storage() -> Self {
        Self::new(&get_api_base())
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }
}

fn transport_error(e: gloo_net::Error) -> BackendError {
    match e {
        // fetch rejects with a TypeError when the server cannot be reached
        gloo_net::Error::JsError(_) => BackendError::Unavailable,
        other => BackendError::Request(other.to_string()),
    }
}

fn authorized(builder: RequestBuilder, token: &BearerToken) -> RequestBuilder {
    builder.header("Authorization", &token.header_value())
}

async fn send(builder: RequestBuilder) -> Result<Response, BackendError> {
    let response = builder.send().await.map_err(transport_error)?;
    check(response).await
}

async fn send_json<T: serde::Serialize>(
    builder: RequestBuilder,
    body: &T,
) -> Result<Response, BackendError> {
    let response = builder
        .json(body)
        .map_err(|e| BackendError::Request(e.to_string()))?
        .send()
        .await
        .map_err(transport_error)?;
    check(response).await
}

async fn check(response: Response) -> Result<Response, BackendError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::from_status(status, &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    response
        .json()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl NotesBackend for GlooBackend {
    async fn signup(&self, credentials: &Credentials) -> Result<(), BackendError> {
        let body = CredentialsRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        send_json(Request::post(&self.url(paths::SIGNUP)), &body).await?;
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, BackendError> {
        let body = CredentialsRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = send_json(Request::post(&self.url(paths::LOGIN)), &body).await?;
        let login: LoginResponse = decode(response).await?;
        Ok(login.access_token)
    }

    async fn list_notes(&self, token: &BearerToken) -> Result<Vec<Note>, BackendError> {
        let response = send(authorized(Request::get(&self.url(paths::NOTES)), token)).await?;
        decode(response).await
    }

    async fn create_note(&self, token: &BearerToken, draft: &NoteDraft) -> Result<(), BackendError> {
        let body = CreateNoteRequest {
            title: &draft.title,
            content: &draft.content,
        };
        send_json(authorized(Request::post(&self.url(paths::NOTES)), token), &body).await?;
        Ok(())
    }

    async fn delete_note(&self, token: &BearerToken, id: i64) -> Result<(), BackendError> {
        send(authorized(Request::delete(&self.url(&paths::note(id))), token)).await?;
        Ok(())
    }

    async fn correct_grammar(&self, token: &BearerToken, text: &str) -> Result<String, BackendError> {
        let builder = authorized(Request::post(&self.url(paths::CORRECT)), token);
        let response = send_json(builder, &CorrectionRequest { text }).await?;
        let correction: CorrectionResponse = decode(response).await?;
        Ok(correction.corrected_text)
    }

    async fn assist(
        &self,
        token: &BearerToken,
        prompt: &str,
        mode: AssistMode,
    ) -> Result<String, BackendError> {
        let builder = authorized(Request::post(&self.url(paths::ASSIST)), token);
        let response = send_json(builder, &AssistRequest { prompt, mode }).await?;
        let assist: AssistResponse = decode(response).await?;
        Ok(assist.completion)
    }

    async fn status(&self) -> Result<String, BackendError> {
        let response = send(Request::get(&self.url(paths::WELCOME))).await?;
        let welcome: WelcomeResponse = decode(response).await?;
        Ok(welcome.message)
    }
}
