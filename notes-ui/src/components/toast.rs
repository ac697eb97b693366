//! Toast Notification Component
//!
//! Stacks the controller's notices in the corner. Click one to dismiss it.

use leptos::*;

use crate::state::global::ToastEntry;
use crate::state::use_global_state;

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="toasts">
            <For
                each=move || state.toasts.get()
                key=|toast| toast.id
                children=move |toast| view! { <ToastMessage toast=toast /> }
            />
        </div>
    }
}

#[component]
fn ToastMessage(toast: ToastEntry) -> impl IntoView {
    let state = use_global_state();
    let id = toast.id;

    let (icon, class) = if toast.notice.is_failure() {
        ("✕", "toast toast-error")
    } else {
        ("✓", "toast toast-success")
    };

    view! {
        <div class=class role="status" on:click=move |_| state.dismiss(id)>
            <span class="toast-icon">{icon}</span>
            <span>{toast.notice.message().to_string()}</span>
        </div>
    }
}
