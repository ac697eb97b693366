//! UI Components
//!
//! Leptos components for the notes page. Each one reads the controller's
//! latest view from [`GlobalState`](crate::state::GlobalState) and sends
//! user actions to the shared client.

pub mod assistant;
pub mod auth;
pub mod composer;
pub mod notes_grid;
pub mod settings;
pub mod toast;

pub use assistant::Assistant;
pub use auth::AuthForm;
pub use composer::Composer;
pub use notes_grid::NotesGrid;
pub use settings::BackendSettings;
pub use toast::Toast;

use leptos::*;
use notes_assistant::{Operation, Workspace};

use crate::state::GlobalState;

/// Whether `op` has a request in flight
pub(crate) fn pending(state: GlobalState, op: Operation) -> Signal<bool> {
    Signal::derive(move || state.view.with(|view| view.activity.is_pending(op)))
}

/// Read a workspace field, or its default while logged out
pub(crate) fn workspace_field<T: Default>(
    state: GlobalState,
    field: impl Fn(&Workspace) -> T,
) -> T {
    state
        .view
        .with(|view| view.workspace.as_ref().map(&field).unwrap_or_default())
}

/// Action button that shows an in-flight label but stays clickable
#[component]
pub fn ActionButton(
    #[prop(into)] label: String,
    #[prop(into)] busy_label: String,
    busy: Signal<bool>,
    #[prop(default = "btn-primary")] class: &'static str,
    on_click: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class=format!("btn {}", class)
            on:click=move |_| on_click.call(())
        >
            {move || if busy.get() { busy_label.clone() } else { label.clone() }}
        </button>
    }
}
