//! App Root Component
//!
//! Provides global state, restores the session and lays out the page.

use leptos::*;

use crate::components::{Assistant, AuthForm, BackendSettings, Composer, NotesGrid, Toast};
use crate::state::{provide_global_state, use_global_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    let state = use_global_state();
    let authenticated = create_memo(move |_| state.view.with(|v| v.is_authenticated()));

    view! {
        <div class="page">
            <header>
                <h1>"AI Notes Assistant"</h1>
            </header>

            <main>
                <AuthForm />

                // Workspace only exists while authenticated
                <Show when=move || authenticated.get()>
                    <Composer />
                    <Assistant />
                    <NotesGrid />
                </Show>
            </main>

            <BackendSettings />
            <Toast />
        </div>
    }
}
