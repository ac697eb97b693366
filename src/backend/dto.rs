//! Wire DTOs
//!
//! Request and response bodies for the notes backend.

use serde::{Deserialize, Serialize};

use crate::model::AssistMode;

#[derive(Debug, Serialize)]
pub struct CredentialsRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct CreateNoteRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CorrectionRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CorrectionResponse {
    pub corrected_text: String,
}

#[derive(Debug, Serialize)]
pub struct AssistRequest<'a> {
    pub prompt: &'a str,
    pub mode: AssistMode,
}

#[derive(Debug, Deserialize)]
pub struct AssistResponse {
    pub completion: String,
}

/// Body of `GET /`
#[derive(Debug, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// FastAPI error body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
