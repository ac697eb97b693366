//! Native HTTP backend
//!
//! `reqwest` implementation of [`NotesBackend`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{
    AssistRequest, AssistResponse, CorrectionRequest, CorrectionResponse, CreateNoteRequest,
    CredentialsRequest, LoginResponse, WelcomeResponse,
};
use super::{endpoint, paths, BackendError, NotesBackend};
use crate::model::{AssistMode, Credentials, Note, NoteDraft};
use crate::session::BearerToken;

/// Notes backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend client.
    ///
    /// With `timeout = None` requests wait as long as the network does.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder, token: &BearerToken) -> RequestBuilder {
        request.header(reqwest::header::AUTHORIZATION, token.header_value())
    }

    /// Send and decode a JSON body from a 2xx response
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        let response = Self::check(request.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Send and discard the body of a 2xx response
    async fn send_empty(&self, request: RequestBuilder) -> Result<(), BackendError> {
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(BackendError::from_status(status.as_u16(), &text))
        }
    }
}

#[async_trait(?Send)]
impl NotesBackend for HttpBackend {
    async fn signup(&self, credentials: &Credentials) -> Result<(), BackendError> {
        let body = CredentialsRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        self.send_empty(self.client.post(self.url(paths::SIGNUP)).json(&body))
            .await
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, BackendError> {
        let body = CredentialsRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response: LoginResponse = self
            .send_json(self.client.post(self.url(paths::LOGIN)).json(&body))
            .await?;
        Ok(response.access_token)
    }

    async fn list_notes(&self, token: &BearerToken) -> Result<Vec<Note>, BackendError> {
        let request = self.authorized(self.client.get(self.url(paths::NOTES)), token);
        self.send_json(request).await
    }

    async fn create_note(&self, token: &BearerToken, draft: &NoteDraft) -> Result<(), BackendError> {
        let body = CreateNoteRequest {
            title: &draft.title,
            content: &draft.content,
        };
        let request = self.authorized(self.client.post(self.url(paths::NOTES)), token);
        self.send_empty(request.json(&body)).await
    }

    async fn delete_note(&self, token: &BearerToken, id: i64) -> Result<(), BackendError> {
        let request = self.authorized(self.client.delete(self.url(&paths::note(id))), token);
        self.send_empty(request).await
    }

    async fn correct_grammar(&self, token: &BearerToken, text: &str) -> Result<String, BackendError> {
        let request = self.authorized(self.client.post(self.url(paths::CORRECT)), token);
        let response: CorrectionResponse = self
            .send_json(request.json(&CorrectionRequest { text }))
            .await?;
        Ok(response.corrected_text)
    }

    async fn assist(
        &self,
        token: &BearerToken,
        prompt: &str,
        mode: AssistMode,
    ) -> Result<String, BackendError> {
        let request = self.authorized(self.client.post(self.url(paths::ASSIST)), token);
        let response: AssistResponse = self
            .send_json(request.json(&AssistRequest { prompt, mode }))
            .await?;
        Ok(response.completion)
    }

    async fn status(&self) -> Result<String, BackendError> {
        let response: WelcomeResponse = self
            .send_json(self.client.get(self.url(paths::WELCOME)))
            .await?;
        Ok(response.message)
    }
}
