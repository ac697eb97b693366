//! Notes Backend
//!
//! The remote service that owns accounts, notes and the AI models. The
//! client only ever reaches it through [`NotesBackend`].
//!
//! # Endpoints
//!
//! - `POST /signup` - create an account
//! - `POST /login` - exchange credentials for a bearer token
//! - `GET /notes/` - list the caller's notes
//! - `POST /notes/` - create a note
//! - `DELETE /notes/{id}` - delete a note
//! - `POST /correct/` - grammar correction
//! - `POST /assist/` - writing assistant
//! - `GET /` - welcome message

pub mod dto;
mod error;
#[cfg(feature = "native")]
mod http;

pub use error::BackendError;
#[cfg(feature = "native")]
pub use http::HttpBackend;

use async_trait::async_trait;

use crate::model::{AssistMode, Credentials, Note, NoteDraft};
use crate::session::BearerToken;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Request paths, relative to the base URL
pub mod paths {
    pub const WELCOME: &str = "/";
    pub const SIGNUP: &str = "/signup";
    pub const LOGIN: &str = "/login";
    pub const NOTES: &str = "/notes/";
    pub const CORRECT: &str = "/correct/";
    pub const ASSIST: &str = "/assist/";

    pub fn note(id: i64) -> String {
        format!("/notes/{}", id)
    }
}

/// Join a base URL and an absolute request path
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Remote operations used by the client.
///
/// Authenticated calls take the session token explicitly. Futures are not
/// required to be `Send` so browser implementations can be used.
#[async_trait(?Send)]
pub trait NotesBackend {
    /// Create an account
    async fn signup(&self, credentials: &Credentials) -> Result<(), BackendError>;

    /// Exchange credentials for a raw access token
    async fn login(&self, credentials: &Credentials) -> Result<String, BackendError>;

    async fn list_notes(&self, token: &BearerToken) -> Result<Vec<Note>, BackendError>;

    async fn create_note(&self, token: &BearerToken, draft: &NoteDraft) -> Result<(), BackendError>;

    async fn delete_note(&self, token: &BearerToken, id: i64) -> Result<(), BackendError>;

    /// Returns the corrected text
    async fn correct_grammar(&self, token: &BearerToken, text: &str) -> Result<String, BackendError>;

    /// Returns the completion
    async fn assist(
        &self,
        token: &BearerToken,
        prompt: &str,
        mode: AssistMode,
    ) -> Result<String, BackendError>;

    /// Welcome message from `GET /`
    async fn status(&self) -> Result<String, BackendError>;
}
