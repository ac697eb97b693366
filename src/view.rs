//! View Model
//!
//! Snapshot of everything a front end draws, plus the [`Presenter`] seam the
//! controller renders and reports notices through.

use crate::lifecycle::Lifecycles;
use crate::model::{AssistMode, Credentials, Note, NoteDraft};
use crate::session::ViewState;

/// Full render snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub state: ViewState,
    /// Auth form fields; the form is shown in both states
    pub credentials: Credentials,
    /// Present only while authenticated
    pub workspace: Option<Workspace>,
    pub activity: Lifecycles,
}

impl Default for View {
    fn default() -> Self {
        Self {
            state: ViewState::Unauthenticated,
            credentials: Credentials::default(),
            workspace: None,
            activity: Lifecycles::default(),
        }
    }
}

impl View {
    pub fn is_authenticated(&self) -> bool {
        self.state == ViewState::Authenticated
    }
}

/// Composer, assistant and notes grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workspace {
    pub composer: NoteDraft,
    /// Last grammar correction; empty when none
    pub correction: String,
    pub assistant: AssistPanel,
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistPanel {
    pub prompt: String,
    pub mode: AssistMode,
    /// Last completion; empty when none
    pub output: String,
}

/// User-facing notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Failure(message) => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure(_))
    }
}

/// Where the controller sends notices and render snapshots
pub trait Presenter {
    fn notify(&self, notice: Notice);

    fn render(&self, view: &View);
}
