//! Notes Assistant
//!
//! AI-assisted notes in the browser, built with Leptos (WASM).
//!
//! # Features
//!
//! - Signup and login with a persisted session
//! - Notes grid with create and delete
//! - Grammar correction of the draft
//! - Writing assistant with prompt modes
//!
//! # Architecture
//!
//! A client-side rendered (CSR) Leptos application. All behaviour lives in
//! the shared `notes-assistant` controller; this crate supplies its browser
//! backend, token store and presenter.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
