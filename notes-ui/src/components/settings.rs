//! Backend connection settings

use leptos::*;

use crate::api;
use crate::state::{use_client, use_global_state};

#[component]
pub fn BackendSettings() -> impl IntoView {
    let state = use_global_state();
    let client = use_client();

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);

    let test_connection = move |_| {
        set_testing.set(true);
        let client = client.clone();
        spawn_local(async move {
            match client.status().await {
                Ok(message) => state.show_success(&format!("Connected: {}", message)),
                Err(e) => state.show_error(&format!("Connection failed: {}", e)),
            }
            set_testing.set(false);
        });
    };

    // The backend is built once at startup
    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        set_api_url.set(api::get_api_base());
        state.show_success("API URL saved. Reload to apply.");
    };

    view! {
        <footer class="settings">
            <label for="api-url">"Backend"</label>
            <input
                id="api-url"
                type="url"
                prop:value=api_url
                on:input=move |ev| set_api_url.set(event_target_value(&ev))
            />
            <button class="btn btn-secondary" on:click=save_url>"Save"</button>
            <button class="btn btn-secondary" on:click=test_connection>
                {move || if testing.get() { "Testing..." } else { "Test connection" }}
            </button>
        </footer>
    }
}
