//! Signup and login form

use leptos::*;
use notes_assistant::Operation;

use crate::components::{pending, ActionButton};
use crate::state::{use_client, use_global_state};

#[component]
pub fn AuthForm() -> impl IntoView {
    let state = use_global_state();
    let client = use_client();

    let email_client = client.clone();
    let password_client = client.clone();

    let signup = {
        let client = client.clone();
        Callback::new(move |_| {
            let client = client.clone();
            spawn_local(async move {
                let _ = client.signup(client.credentials()).await;
            });
        })
    };
    let login = Callback::new(move |_| {
        let client = client.clone();
        spawn_local(async move {
            let _ = client.login(client.credentials()).await;
        });
    });

    view! {
        <section class="card">
            <h2>"Account"</h2>
            <div class="row">
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || state.view.with(|v| v.credentials.email.clone())
                    on:input=move |ev| email_client.set_email(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || state.view.with(|v| v.credentials.password.clone())
                    on:input=move |ev| password_client.set_password(event_target_value(&ev))
                />
            </div>
            <div class="row">
                <ActionButton
                    label="Signup"
                    busy_label="Signing up..."
                    busy=pending(state, Operation::Signup)
                    class="btn-secondary"
                    on_click=signup
                />
                <ActionButton
                    label="Login"
                    busy_label="Logging in..."
                    busy=pending(state, Operation::Login)
                    on_click=login
                />
            </div>
            {move || state.view.with(|v| v.is_authenticated()).then(|| view! {
                <p class="muted">"Logged in"</p>
            })}
        </section>
    }
}
