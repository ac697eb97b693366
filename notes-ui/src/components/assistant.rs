//! AI writing assistant

use leptos::*;
use notes_assistant::{AssistMode, Operation};

use crate::components::{pending, workspace_field, ActionButton};
use crate::state::{use_client, use_global_state};

#[component]
pub fn Assistant() -> impl IntoView {
    let state = use_global_state();
    let client = use_client();

    let prompt = move || workspace_field(state, |w| w.assistant.prompt.clone());
    let mode = move || workspace_field(state, |w| w.assistant.mode);
    let output = move || workspace_field(state, |w| w.assistant.output.clone());

    let prompt_client = client.clone();
    let mode_client = client.clone();
    let on_mode = move |ev: ev::Event| match event_target_value(&ev).parse::<AssistMode>() {
        Ok(mode) => mode_client.set_mode(mode),
        Err(e) => tracing::warn!(error = %e, "Ignoring unknown mode"),
    };

    let generate = Callback::new(move |_| {
        let client = client.clone();
        spawn_local(async move {
            let panel = client.assistant();
            let _ = client.get_ai_completion(&panel.prompt, panel.mode).await;
        });
    });

    view! {
        <section class="card">
            <h2>"AI Writing Assistant"</h2>
            <textarea
                rows="3"
                placeholder="What should the assistant write?"
                prop:value=prompt
                on:input=move |ev| prompt_client.set_prompt(event_target_value(&ev))
            />
            <div class="row">
                <select on:change=on_mode>
                    {AssistMode::ALL
                        .into_iter()
                        .map(|option| view! {
                            <option
                                value=option.as_str()
                                selected=move || mode() == option
                            >
                                {option.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
                <ActionButton
                    label="Generate"
                    busy_label="Generating..."
                    busy=pending(state, Operation::Assist)
                    on_click=generate
                />
            </div>
            {move || {
                let text = output();
                (!text.is_empty()).then(|| view! {
                    <div class="output">
                        <strong>"AI Output:"</strong>
                        <p>{text}</p>
                    </div>
                })
            }}
        </section>
    }
}
