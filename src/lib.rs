//! # Notes Assistant
//!
//! Client for an AI-assisted notes service: sign up, log in, keep a list of
//! notes, and call the backend's grammar correction and writing assistant.
//!
//! ## Modules
//!
//! - [`controller`]: the [`NotesClient`] driving every front end
//! - [`backend`]: the remote service interface and its HTTP implementation
//! - [`session`]: bearer token and authentication state machine
//! - [`store`]: token persistence
//! - [`view`]: render snapshots and the presenter seam
//! - [`lifecycle`]: per-operation request status
//! - [`config`]: configuration files and environment overrides (native)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notes_assistant::{
//!     Credentials, FileTokenStore, HttpBackend, NotesClient, TerminalPresenter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new("http://localhost:8080", None)?;
//!     let store = FileTokenStore::new("./.notes-token");
//!     let client = NotesClient::new(backend, store, TerminalPresenter::new());
//!
//!     // Restores a saved token and fetches notes if there is one
//!     client.start().await?;
//!     client.login(Credentials::new("a@b.com", "secret")).await?;
//!
//!     for note in client.notes() {
//!         println!("{}: {}", note.id, note.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
#[cfg(feature = "native")]
pub mod config;
pub mod controller;
pub mod lifecycle;
pub mod model;
pub mod session;
#[cfg(feature = "native")]
pub mod shell;
pub mod store;
#[cfg(feature = "native")]
pub mod terminal;
pub mod view;

pub use backend::{BackendError, NotesBackend, DEFAULT_BASE_URL};
pub use controller::{ClientError, NotesClient};
pub use lifecycle::{Lifecycle, Lifecycles, Operation, RequestStatus};
pub use model::{AssistMode, Credentials, Note, NoteDraft, ParseAssistModeError};
pub use session::{BearerToken, SessionState, Transition, ViewState};
pub use store::{MemoryTokenStore, StoreError, TokenStore};
pub use view::{AssistPanel, Notice, Presenter, View, Workspace};

#[cfg(feature = "native")]
pub use backend::HttpBackend;
#[cfg(feature = "native")]
pub use config::{ApiConfig, Config, ConfigError, LoadReport, LoggingConfig, SessionConfig};
#[cfg(feature = "native")]
pub use store::FileTokenStore;
#[cfg(feature = "native")]
pub use terminal::TerminalPresenter;
