//! Notes Client
//!
//! The controller behind every front end: holds the session, form fields and
//! cached notes, dispatches the remote calls and renders through a
//! [`Presenter`].
//!
//! All operations take `&self`. State sits behind a mutex that is never held
//! across an `.await`, so operations may overlap freely; nothing is
//! serialized, deduplicated, cancelled or retried.

use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::backend::{BackendError, NotesBackend};
use crate::lifecycle::{Lifecycles, Operation};
use crate::model::{AssistMode, Credentials, Note, NoteDraft};
use crate::session::{BearerToken, SessionState, Transition, ViewState};
use crate::store::TokenStore;
use crate::view::{AssistPanel, Notice, Presenter, View, Workspace};

/// Errors returned to programmatic callers. Users only ever see the
/// operation's generic notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Debug, Default)]
struct ClientState {
    credentials: Credentials,
    session: SessionState,
    composer: NoteDraft,
    notes: Vec<Note>,
    correction: String,
    assistant: AssistPanel,
    lifecycles: Lifecycles,
}

impl ClientState {
    fn view(&self) -> View {
        let state = self.session.view_state();
        let workspace = (state == ViewState::Authenticated).then(|| Workspace {
            composer: self.composer.clone(),
            correction: self.correction.clone(),
            assistant: self.assistant.clone(),
            notes: self.notes.clone(),
        });

        View {
            state,
            credentials: self.credentials.clone(),
            workspace,
            activity: self.lifecycles.clone(),
        }
    }
}

/// Client for the notes backend
pub struct NotesClient<B, S, P> {
    backend: B,
    store: S,
    presenter: P,
    inner: Mutex<ClientState>,
}

impl<B, S, P> NotesClient<B, S, P>
where
    B: NotesBackend,
    S: TokenStore,
    P: Presenter,
{
    pub fn new(backend: B, store: S, presenter: P) -> Self {
        Self {
            backend,
            store,
            presenter,
            inner: Mutex::new(ClientState::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    fn state(&self) -> MutexGuard<'_, ClientState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ============ Snapshot Accessors ============

    pub fn view(&self) -> View {
        self.state().view()
    }

    pub fn view_state(&self) -> ViewState {
        self.state().session.view_state()
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.state().session.token().cloned()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state().notes.clone()
    }

    pub fn credentials(&self) -> Credentials {
        self.state().credentials.clone()
    }

    pub fn composer(&self) -> NoteDraft {
        self.state().composer.clone()
    }

    pub fn assistant(&self) -> AssistPanel {
        self.state().assistant.clone()
    }

    // ============ Form Fields ============

    pub fn set_email(&self, email: impl Into<String>) {
        self.state().credentials.email = email.into();
        self.render();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.state().credentials.password = password.into();
        self.render();
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state().composer.title = title.into();
        self.render();
    }

    pub fn set_content(&self, content: impl Into<String>) {
        self.state().composer.content = content.into();
        self.render();
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        self.state().assistant.prompt = prompt.into();
        self.render();
    }

    pub fn set_mode(&self, mode: AssistMode) {
        self.state().assistant.mode = mode;
        self.render();
    }

    // ============ Startup ============

    /// Restore the persisted token and render the initial view.
    ///
    /// Finding a token counts as entering the authenticated state, which
    /// triggers the one initial fetch. Calling this again with the same
    /// stored token does nothing further. Returns the result of that fetch;
    /// `Ok` when none was needed. An unreadable store is logged and treated
    /// as empty.
    pub async fn start(&self) -> Result<(), ClientError> {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Could not read stored session token");
                None
            }
        };

        let transition = match SessionState::restore(stored) {
            SessionState::Authenticated(token) => self.state().session.authenticate(token),
            SessionState::Anonymous => Transition::Unchanged,
        };
        debug!(?transition, "Session restored");
        self.render();

        if transition.requires_fetch() {
            self.fetch_notes().await
        } else {
            Ok(())
        }
    }

    // ============ Session ============

    pub async fn signup(&self, credentials: Credentials) -> Result<(), ClientError> {
        let op = Operation::Signup;
        self.begin(op);

        match self.backend.signup(&credentials).await {
            Ok(()) => {
                self.succeed(op);
                Ok(())
            }
            Err(e) => Err(self.fail(op, e.into())),
        }
    }

    /// Exchange credentials for a token.
    ///
    /// On failure any previous token stays in place. A new or different
    /// token triggers one notes fetch.
    pub async fn login(&self, credentials: Credentials) -> Result<(), ClientError> {
        let op = Operation::Login;
        self.begin(op);

        let token = match self.backend.login(&credentials).await {
            Ok(raw) => match BearerToken::new(raw) {
                Some(token) => token,
                None => {
                    let e = BackendError::Decode("empty access token".to_string());
                    return Err(self.fail(op, e.into()));
                }
            },
            Err(e) => return Err(self.fail(op, e.into())),
        };

        if let Err(e) = self.store.save(token.as_str()) {
            warn!(error = %e, "Could not persist session token");
        }
        let transition = self.state().session.authenticate(token);
        debug!(?transition, "Logged in");
        self.succeed(op);

        if transition.requires_fetch() {
            let _ = self.fetch_notes().await;
        }
        Ok(())
    }

    // ============ Notes ============

    /// Replace the notes cache with the server's list
    pub async fn fetch_notes(&self) -> Result<(), ClientError> {
        let op = Operation::FetchNotes;
        let token = self.require_token(op)?;
        self.begin(op);

        match self.backend.list_notes(&token).await {
            Ok(notes) => {
                debug!(count = notes.len(), "Notes fetched");
                self.state().notes = notes;
                self.succeed(op);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Could not fetch notes");
                Err(self.fail(op, e.into()))
            }
        }
    }

    /// Create a note, refetch, then clear the composer.
    ///
    /// On failure the composer keeps whatever the user typed.
    pub async fn submit_note(&self, draft: NoteDraft) -> Result<(), ClientError> {
        let op = Operation::SubmitNote;
        let token = self.require_token(op)?;
        self.begin(op);

        if let Err(e) = self.backend.create_note(&token, &draft).await {
            return Err(self.fail(op, e.into()));
        }
        self.succeed(op);

        let _ = self.fetch_notes().await;
        self.state().composer.clear();
        self.render();
        Ok(())
    }

    /// Delete a note and refetch. The cache is untouched until the refetch.
    pub async fn delete_note(&self, id: i64) -> Result<(), ClientError> {
        let op = Operation::DeleteNote;
        let token = self.require_token(op)?;
        self.begin(op);

        if let Err(e) = self.backend.delete_note(&token, id).await {
            warn!(note_id = id, error = %e, "Error deleting note");
            return Err(self.fail(op, e.into()));
        }
        self.succeed(op);

        let _ = self.fetch_notes().await;
        Ok(())
    }

    // ============ AI Assist ============

    /// Replace the displayed correction with the backend's version of `text`
    pub async fn correct_grammar(&self, text: &str) -> Result<(), ClientError> {
        let op = Operation::CorrectGrammar;
        let token = self.require_token(op)?;
        self.begin(op);

        match self.backend.correct_grammar(&token, text).await {
            Ok(corrected) => {
                self.state().correction = corrected;
                self.succeed(op);
                Ok(())
            }
            Err(e) => Err(self.fail(op, e.into())),
        }
    }

    /// Replace the displayed completion with a fresh one
    pub async fn get_ai_completion(&self, prompt: &str, mode: AssistMode) -> Result<(), ClientError> {
        let op = Operation::Assist;
        let token = self.require_token(op)?;
        self.begin(op);

        match self.backend.assist(&token, prompt, mode).await {
            Ok(completion) => {
                self.state().assistant.output = completion;
                self.succeed(op);
                Ok(())
            }
            Err(e) => Err(self.fail(op, e.into())),
        }
    }

    /// Backend welcome message. Not part of the view.
    pub async fn status(&self) -> Result<String, ClientError> {
        Ok(self.backend.status().await?)
    }

    // ============ Lifecycle Plumbing ============

    fn render(&self) {
        let view = self.view();
        self.presenter.render(&view);
    }

    fn require_token(&self, op: Operation) -> Result<BearerToken, ClientError> {
        match self.token() {
            Some(token) => Ok(token),
            None => {
                debug!(operation = op.name(), "Rejected: no session token");
                self.presenter
                    .notify(Notice::Failure(op.failure_notice().to_string()));
                Err(ClientError::NotAuthenticated)
            }
        }
    }

    fn begin(&self, op: Operation) {
        let request_id = Uuid::new_v4();
        let in_flight = self.state().lifecycles.begin(op);
        if in_flight > 1 {
            debug!(operation = op.name(), in_flight, "Duplicate request in flight");
        }
        debug!(%request_id, operation = op.name(), "Dispatching request");
        self.render();
    }

    fn succeed(&self, op: Operation) {
        self.state().lifecycles.finish(op, true);
        if let Some(message) = op.success_notice() {
            self.presenter.notify(Notice::Success(message.to_string()));
        }
        self.render();
    }

    fn fail(&self, op: Operation, error: ClientError) -> ClientError {
        debug!(operation = op.name(), error = %error, "Request failed");
        self.state().lifecycles.finish(op, false);
        self.presenter
            .notify(Notice::Failure(op.failure_notice().to_string()));
        self.render();
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryTokenStore, StoreError};
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::HashSet;

    // ============ Test Doubles ============

    /// Scripted in-memory backend that yields once per call so concurrent
    /// operations interleave
    #[derive(Default)]
    struct FakeBackend {
        inner: Mutex<FakeState>,
    }

    #[derive(Default)]
    struct FakeState {
        notes: Vec<Note>,
        next_id: i64,
        token: String,
        failing: HashSet<&'static str>,
        calls: Vec<&'static str>,
        tokens_seen: Vec<String>,
    }

    impl FakeBackend {
        fn new() -> Self {
            let backend = Self::default();
            backend.state().token = "tok1".to_string();
            backend.state().next_id = 1;
            backend
        }

        fn with_notes(notes: Vec<Note>) -> Self {
            let backend = Self::new();
            backend.state().next_id = notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
            backend.state().notes = notes;
            backend
        }

        fn state(&self) -> MutexGuard<'_, FakeState> {
            self.inner.lock().unwrap()
        }

        fn fail(&self, endpoint: &'static str) {
            self.state().failing.insert(endpoint);
        }

        fn recover(&self, endpoint: &'static str) {
            self.state().failing.remove(endpoint);
        }

        fn issue_token(&self, token: &str) {
            self.state().token = token.to_string();
        }

        fn calls(&self, endpoint: &str) -> usize {
            self.state().calls.iter().filter(|c| **c == endpoint).count()
        }

        fn call_log(&self) -> Vec<&'static str> {
            self.state().calls.clone()
        }

        async fn enter(&self, endpoint: &'static str, token: Option<&BearerToken>) -> Result<(), BackendError> {
            {
                let mut state = self.state();
                state.calls.push(endpoint);
                if let Some(token) = token {
                    state.tokens_seen.push(token.as_str().to_string());
                }
            }
            tokio::task::yield_now().await;
            if self.state().failing.contains(endpoint) {
                Err(BackendError::Api {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait(?Send)]
    impl NotesBackend for FakeBackend {
        async fn signup(&self, _credentials: &Credentials) -> Result<(), BackendError> {
            self.enter("signup", None).await
        }

        async fn login(&self, credentials: &Credentials) -> Result<String, BackendError> {
            self.enter("login", None).await?;
            if credentials.password == "x" {
                Ok(self.state().token.clone())
            } else {
                Err(BackendError::Api {
                    status: 401,
                    message: "Invalid credentials".to_string(),
                })
            }
        }

        async fn list_notes(&self, token: &BearerToken) -> Result<Vec<Note>, BackendError> {
            self.enter("list", Some(token)).await?;
            Ok(self.state().notes.clone())
        }

        async fn create_note(&self, token: &BearerToken, draft: &NoteDraft) -> Result<(), BackendError> {
            self.enter("create", Some(token)).await?;
            let mut state = self.state();
            let id = state.next_id;
            state.next_id += 1;
            state.notes.push(Note {
                id,
                title: draft.title.clone(),
                content: draft.content.clone(),
            });
            Ok(())
        }

        async fn delete_note(&self, token: &BearerToken, id: i64) -> Result<(), BackendError> {
            self.enter("delete", Some(token)).await?;
            self.state().notes.retain(|n| n.id != id);
            Ok(())
        }

        async fn correct_grammar(&self, token: &BearerToken, text: &str) -> Result<String, BackendError> {
            self.enter("correct", Some(token)).await?;
            Ok(format!("{} (corrected)", text))
        }

        async fn assist(
            &self,
            token: &BearerToken,
            prompt: &str,
            mode: AssistMode,
        ) -> Result<String, BackendError> {
            self.enter("assist", Some(token)).await?;
            Ok(match (prompt, mode) {
                ("hi", AssistMode::Casual) => "Hey!".to_string(),
                _ => format!("[{}] {}", mode, prompt),
            })
        }

        async fn status(&self) -> Result<String, BackendError> {
            self.enter("status", None).await?;
            Ok("Welcome to AI Notes!".to_string())
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        notices: RefCell<Vec<Notice>>,
        views: RefCell<Vec<View>>,
    }

    impl RecordingPresenter {
        fn notices(&self) -> Vec<Notice> {
            self.notices.borrow().clone()
        }

        fn last_view(&self) -> View {
            self.views.borrow().last().cloned().unwrap_or_default()
        }

        fn max_in_flight(&self, op: Operation) -> usize {
            self.views
                .borrow()
                .iter()
                .map(|v| v.activity.get(op).in_flight)
                .max()
                .unwrap_or(0)
        }
    }

    impl Presenter for RecordingPresenter {
        fn notify(&self, notice: Notice) {
            self.notices.borrow_mut().push(notice);
        }

        fn render(&self, view: &View) {
            self.views.borrow_mut().push(view.clone());
        }
    }

    /// Store whose reads and writes always fail
    struct FailingTokenStore;

    impl TokenStore for FailingTokenStore {
        fn load(&self) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disk gone".to_string()))
        }

        fn save(&self, _token: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk gone".to_string()))
        }
    }

    type TestClient = NotesClient<FakeBackend, MemoryTokenStore, RecordingPresenter>;

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn client(backend: FakeBackend, store: MemoryTokenStore) -> TestClient {
        NotesClient::new(backend, store, RecordingPresenter::default())
    }

    async fn logged_in(backend: FakeBackend) -> TestClient {
        let client = client(backend, MemoryTokenStore::with_token("tok1"));
        client.start().await.unwrap();
        client
    }

    fn failure(message: &str) -> Notice {
        Notice::Failure(message.to_string())
    }

    // ============ Startup ============

    #[tokio::test]
    async fn test_start_without_token_stays_unauthenticated() {
        let client = client(FakeBackend::new(), MemoryTokenStore::new());
        client.start().await.unwrap();

        assert_eq!(client.view_state(), ViewState::Unauthenticated);
        assert!(client.presenter().last_view().workspace.is_none());
        assert_eq!(client.backend().calls("list"), 0);
    }

    #[tokio::test]
    async fn test_start_with_stored_token_fetches_once() {
        let backend = FakeBackend::with_notes(vec![note(1, "T", "C")]);
        let client = client(backend, MemoryTokenStore::with_token("tok1"));

        client.start().await.unwrap();
        client.start().await.unwrap();

        assert_eq!(client.view_state(), ViewState::Authenticated);
        assert_eq!(client.backend().calls("list"), 1);
        assert_eq!(client.notes(), vec![note(1, "T", "C")]);

        let view = client.presenter().last_view();
        assert_eq!(view.workspace.unwrap().notes, vec![note(1, "T", "C")]);
    }

    #[tokio::test]
    async fn test_start_with_unreadable_store_stays_unauthenticated() {
        let client = NotesClient::new(FakeBackend::new(), FailingTokenStore, RecordingPresenter::default());
        client.start().await.unwrap();

        assert_eq!(client.view_state(), ViewState::Unauthenticated);
        assert!(client.backend().call_log().is_empty());
        assert!(client.presenter().notices().is_empty());
    }

    // ============ Session ============

    #[tokio::test]
    async fn test_login_stores_server_token_and_fetches_once() {
        let client = client(FakeBackend::new(), MemoryTokenStore::new());
        client.start().await.unwrap();

        client.login(Credentials::new("a@b.com", "x")).await.unwrap();

        assert_eq!(client.token().unwrap().as_str(), "tok1");
        assert_eq!(client.store().current(), Some("tok1".to_string()));
        assert_eq!(client.view_state(), ViewState::Authenticated);
        assert_eq!(client.backend().calls("list"), 1);
        assert_eq!(client.backend().state().tokens_seen, vec!["tok1".to_string()]);
        assert!(client
            .presenter()
            .notices()
            .contains(&Notice::Success("Login successful".to_string())));
    }

    #[tokio::test]
    async fn test_login_survives_token_persistence_failure() {
        let client = NotesClient::new(FakeBackend::new(), FailingTokenStore, RecordingPresenter::default());
        client.start().await.unwrap();

        client.login(Credentials::new("a@b.com", "x")).await.unwrap();

        assert_eq!(client.token().unwrap().as_str(), "tok1");
        assert_eq!(client.view_state(), ViewState::Authenticated);
        assert_eq!(client.backend().calls("list"), 1);
        let notices = client.presenter().notices();
        assert!(notices.contains(&Notice::Success("Login successful".to_string())));
        assert!(!notices.iter().any(Notice::is_failure));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_state_untouched() {
        let client = client(FakeBackend::new(), MemoryTokenStore::new());
        client.start().await.unwrap();

        let err = client.login(Credentials::new("a@b.com", "wrong")).await.unwrap_err();
        assert_eq!(err.to_string(), "API error 401: Invalid credentials");
        assert_eq!(client.token(), None);
        assert_eq!(client.store().current(), None);
        assert_eq!(client.view_state(), ViewState::Unauthenticated);
        assert_eq!(client.presenter().notices(), vec![failure("Login failed")]);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_token() {
        let backend = FakeBackend::new();
        backend.fail("login");
        let client = logged_in(backend).await;

        assert!(client.login(Credentials::new("a@b.com", "x")).await.is_err());
        assert_eq!(client.token().unwrap().as_str(), "tok1");
        assert_eq!(client.store().current(), Some("tok1".to_string()));
        assert_eq!(client.view_state(), ViewState::Authenticated);
    }

    #[tokio::test]
    async fn test_login_with_empty_token_fails() {
        let backend = FakeBackend::new();
        backend.issue_token("");
        let client = client(backend, MemoryTokenStore::new());

        let err = client.login(Credentials::new("a@b.com", "x")).await.unwrap_err();
        assert!(matches!(err, ClientError::Backend(BackendError::Decode(_))));
        assert_eq!(client.view_state(), ViewState::Unauthenticated);
        assert_eq!(client.store().current(), None);
    }

    #[tokio::test]
    async fn test_relogin_fetches_only_for_new_token() {
        let client = logged_in(FakeBackend::new()).await;
        assert_eq!(client.backend().calls("list"), 1);

        client.login(Credentials::new("a@b.com", "x")).await.unwrap();
        assert_eq!(client.backend().calls("list"), 1);

        client.backend().issue_token("tok2");
        client.login(Credentials::new("other@b.com", "x")).await.unwrap();
        assert_eq!(client.backend().calls("list"), 2);
        assert_eq!(client.store().current(), Some("tok2".to_string()));
    }

    #[tokio::test]
    async fn test_signup_notices() {
        let client = client(FakeBackend::new(), MemoryTokenStore::new());

        client.signup(Credentials::new("a@b.com", "x")).await.unwrap();
        client.backend().fail("signup");
        assert!(client.signup(Credentials::new("a@b.com", "x")).await.is_err());

        assert_eq!(
            client.presenter().notices(),
            vec![
                Notice::Success("Signup successful. You can now log in.".to_string()),
                failure("Signup failed"),
            ]
        );
        assert_eq!(client.token(), None);
        assert_eq!(client.store().current(), None);
    }

    #[tokio::test]
    async fn test_credentials_are_form_state_only() {
        let client = client(FakeBackend::new(), MemoryTokenStore::new());
        client.set_email("a@b.com");
        client.set_password("x");

        client.login(client.credentials()).await.unwrap();
        assert_eq!(client.store().current(), Some("tok1".to_string()));
        assert_eq!(client.presenter().last_view().credentials.email, "a@b.com");
    }

    // ============ Notes ============

    #[tokio::test]
    async fn test_authenticated_calls_require_token() {
        let client = client(FakeBackend::new(), MemoryTokenStore::new());

        assert_eq!(client.fetch_notes().await, Err(ClientError::NotAuthenticated));
        assert_eq!(client.delete_note(1).await, Err(ClientError::NotAuthenticated));
        assert_eq!(
            client.get_ai_completion("hi", AssistMode::Casual).await,
            Err(ClientError::NotAuthenticated)
        );
        assert!(client.backend().call_log().is_empty());
        assert_eq!(
            client.presenter().notices(),
            vec![
                failure("Could not fetch notes"),
                failure("Delete failed"),
                failure("AI assist failed"),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_stale_cache() {
        let backend = FakeBackend::with_notes(vec![note(1, "T", "C")]);
        let client = logged_in(backend).await;

        client.backend().state().notes.push(note(2, "new", "unseen"));
        client.backend().fail("list");
        assert!(client.fetch_notes().await.is_err());

        assert_eq!(client.notes(), vec![note(1, "T", "C")]);
        assert_eq!(client.presenter().notices(), vec![failure("Could not fetch notes")]);
    }

    #[tokio::test]
    async fn test_submit_refetches_then_clears_composer() {
        let backend = FakeBackend::with_notes(vec![note(1, "old", "x")]);
        let client = logged_in(backend).await;
        client.set_title("T");
        client.set_content("C");

        client.submit_note(client.composer()).await.unwrap();

        assert_eq!(client.composer(), NoteDraft::default());
        assert_eq!(client.notes(), client.backend().state().notes);
        assert_eq!(client.notes(), vec![note(1, "old", "x"), note(2, "T", "C")]);
        assert_eq!(client.backend().call_log(), vec!["list", "create", "list"]);

        let workspace = client.presenter().last_view().workspace.unwrap();
        assert_eq!(workspace.composer.title, "");
        assert_eq!(workspace.composer.content, "");
    }

    #[tokio::test]
    async fn test_submit_failure_preserves_composer() {
        let backend = FakeBackend::new();
        backend.fail("create");
        let client = logged_in(backend).await;
        client.set_title("T");
        client.set_content("C");

        assert!(client.submit_note(client.composer()).await.is_err());

        assert_eq!(client.composer(), NoteDraft::new("T", "C"));
        assert_eq!(client.backend().calls("list"), 1);
        assert_eq!(client.presenter().notices(), vec![failure("Note creation failed")]);
    }

    #[tokio::test]
    async fn test_delete_replaces_cache_with_refetch() {
        let backend = FakeBackend::with_notes(vec![note(1, "a", "a"), note(2, "b", "b")]);
        let client = logged_in(backend).await;

        client.delete_note(1).await.unwrap();

        assert_eq!(client.notes(), vec![note(2, "b", "b")]);
        assert_eq!(client.notes(), client.backend().state().notes);
        assert_eq!(client.backend().calls("list"), 2);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_cache_identical() {
        let backend = FakeBackend::with_notes(vec![note(1, "a", "a"), note(2, "b", "b")]);
        let client = logged_in(backend).await;
        let before = client.notes();

        client.backend().fail("delete");
        assert!(client.delete_note(1).await.is_err());

        assert_eq!(client.notes(), before);
        assert_eq!(client.backend().calls("list"), 1);
        assert_eq!(client.presenter().notices(), vec![failure("Delete failed")]);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_deletes_are_not_deduplicated() {
        let backend = FakeBackend::with_notes(vec![note(7, "a", "a"), note(8, "b", "b")]);
        let client = logged_in(backend).await;

        let (first, second) = tokio::join!(client.delete_note(7), client.delete_note(7));
        assert!(first.is_ok());
        assert!(second.is_ok());

        assert_eq!(client.backend().calls("delete"), 2);
        // one fetch at startup, one per delete
        assert_eq!(client.backend().calls("list"), 3);
        assert_eq!(client.presenter().max_in_flight(Operation::DeleteNote), 2);
        assert_eq!(client.notes(), vec![note(8, "b", "b")]);
    }

    #[tokio::test]
    async fn test_refetch_after_recovery() {
        let backend = FakeBackend::with_notes(vec![note(1, "a", "a")]);
        backend.fail("list");
        let client = client(backend, MemoryTokenStore::with_token("tok1"));

        // The entry fetch failure is reported to the caller of start
        assert!(matches!(client.start().await, Err(ClientError::Backend(_))));
        assert_eq!(client.view_state(), ViewState::Authenticated);
        assert_eq!(
            client.view().activity.get(Operation::FetchNotes).status,
            crate::lifecycle::RequestStatus::Failed
        );
        assert!(client.notes().is_empty());

        client.backend().recover("list");
        client.fetch_notes().await.unwrap();
        assert_eq!(client.notes(), vec![note(1, "a", "a")]);
    }

    // ============ AI Assist ============

    #[tokio::test]
    async fn test_assist_output_replaces_previous() {
        let client = logged_in(FakeBackend::new()).await;

        client.get_ai_completion("plan", AssistMode::Idea).await.unwrap();
        assert_eq!(client.assistant().output, "[idea] plan");

        client.get_ai_completion("hi", AssistMode::Casual).await.unwrap();
        assert_eq!(client.assistant().output, "Hey!");
        let workspace = client.presenter().last_view().workspace.unwrap();
        assert_eq!(workspace.assistant.output, "Hey!");
    }

    #[tokio::test]
    async fn test_assist_failure_keeps_previous_output() {
        let client = logged_in(FakeBackend::new()).await;
        client.get_ai_completion("hi", AssistMode::Casual).await.unwrap();

        client.backend().fail("assist");
        assert!(client.get_ai_completion("again", AssistMode::Email).await.is_err());
        assert_eq!(client.assistant().output, "Hey!");
        assert_eq!(client.presenter().notices(), vec![failure("AI assist failed")]);
    }

    #[tokio::test]
    async fn test_grammar_correction_single_slot() {
        let client = logged_in(FakeBackend::new()).await;

        client.correct_grammar("one").await.unwrap();
        client.correct_grammar("two").await.unwrap();

        let workspace = client.presenter().last_view().workspace.unwrap();
        assert_eq!(workspace.correction, "two (corrected)");
        assert_eq!(client.backend().calls("correct"), 2);
    }

    #[tokio::test]
    async fn test_lifecycle_reported_in_view() {
        let client = logged_in(FakeBackend::new()).await;
        client.backend().fail("correct");
        let _ = client.correct_grammar("x").await;

        let activity = client.presenter().last_view().activity;
        assert_eq!(
            activity.get(Operation::CorrectGrammar).status,
            crate::lifecycle::RequestStatus::Failed
        );
        assert_eq!(
            activity.get(Operation::FetchNotes).status,
            crate::lifecycle::RequestStatus::Succeeded
        );
    }

    #[tokio::test]
    async fn test_status_passthrough() {
        let client = client(FakeBackend::new(), MemoryTokenStore::new());
        assert_eq!(client.status().await.unwrap(), "Welcome to AI Notes!");
    }
}
