//! Global Application State
//!
//! Reactive state management using Leptos signals. The controller pushes
//! every render snapshot and notice into these signals through
//! [`UiPresenter`].

use leptos::*;
use std::rc::Rc;

use notes_assistant::{Notice, NotesClient, Presenter, View};

use crate::api::GlooBackend;
use crate::state::storage::LocalTokenStore;

/// The controller as wired for the browser
pub type Client = NotesClient<GlooBackend, LocalTokenStore, UiPresenter>;

/// How long a success toast stays up, in milliseconds
const SUCCESS_TOAST_MS: u32 = 3000;
/// Failures stay a little longer
const ERROR_TOAST_MS: u32 = 5000;

/// A notice on screen
#[derive(Clone, Debug, PartialEq)]
pub struct ToastEntry {
    pub id: u64,
    pub notice: Notice,
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Latest render snapshot from the controller
    pub view: RwSignal<View>,
    /// Notices currently shown, oldest first
    pub toasts: RwSignal<Vec<ToastEntry>>,
    next_toast: StoredValue<u64>,
}

impl GlobalState {
    pub fn new() -> Self {
        Self {
            view: create_rw_signal(View::default()),
            toasts: create_rw_signal(Vec::new()),
            next_toast: store_value(0),
        }
    }

    /// Show a notice until its timeout or until dismissed.
    ///
    /// Overlapping operations each get their own toast.
    pub fn push_notice(&self, notice: Notice) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id + 1);

        let timeout = if notice.is_failure() {
            ERROR_TOAST_MS
        } else {
            SUCCESS_TOAST_MS
        };
        self.toasts.update(|toasts| toasts.push(ToastEntry { id, notice }));

        let state = *self;
        gloo_timers::callback::Timeout::new(timeout, move || state.dismiss(id)).forget();
    }

    pub fn show_success(&self, message: &str) {
        self.push_notice(Notice::Success(message.to_string()));
    }

    pub fn show_error(&self, message: &str) {
        self.push_notice(Notice::Failure(message.to_string()));
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new()
    }
}

/// Presenter writing into [`GlobalState`]
#[derive(Clone, Copy)]
pub struct UiPresenter {
    state: GlobalState,
}

impl Presenter for UiPresenter {
    fn notify(&self, notice: Notice) {
        self.state.push_notice(notice);
    }

    fn render(&self, view: &View) {
        self.state.view.set(view.clone());
    }
}

/// Provide global state and the client to the component tree, then restore
/// any stored session.
pub fn provide_global_state() {
    let state = GlobalState::new();
    let client = Rc::new(NotesClient::new(
        GlooBackend::from_storage(),
        LocalTokenStore::new(),
        UiPresenter { state },
    ));

    provide_context(state);
    provide_context(client.clone());

    spawn_local(async move {
        // Failures were already shown as notices
        let _ = client.start().await;
    });
}

/// Fetch the client from context
pub fn use_client() -> Rc<Client> {
    expect_context::<Rc<Client>>()
}

/// Fetch the global state from context
pub fn use_global_state() -> GlobalState {
    expect_context::<GlobalState>()
}
