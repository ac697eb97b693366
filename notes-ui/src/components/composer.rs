//! Note composer with grammar check

use leptos::*;
use notes_assistant::Operation;

use crate::components::{pending, workspace_field, ActionButton};
use crate::state::{use_client, use_global_state};

#[component]
pub fn Composer() -> impl IntoView {
    let state = use_global_state();
    let client = use_client();

    let title = move || workspace_field(state, |w| w.composer.title.clone());
    let content = move || workspace_field(state, |w| w.composer.content.clone());
    let correction = move || workspace_field(state, |w| w.correction.clone());

    let title_client = client.clone();
    let content_client = client.clone();

    let save = {
        let client = client.clone();
        Callback::new(move |_| {
            let client = client.clone();
            spawn_local(async move {
                let _ = client.submit_note(client.composer()).await;
            });
        })
    };
    let grammar = Callback::new(move |_| {
        let client = client.clone();
        spawn_local(async move {
            let text = client.composer().content;
            let _ = client.correct_grammar(&text).await;
        });
    });

    view! {
        <section class="card">
            <h2>"New Note"</h2>
            <input
                type="text"
                placeholder="Title"
                prop:value=title
                on:input=move |ev| title_client.set_title(event_target_value(&ev))
            />
            <textarea
                rows="5"
                placeholder="Write your note..."
                prop:value=content
                on:input=move |ev| content_client.set_content(event_target_value(&ev))
            />
            <div class="row">
                <ActionButton
                    label="Save"
                    busy_label="Saving..."
                    busy=pending(state, Operation::SubmitNote)
                    on_click=save
                />
                <ActionButton
                    label="Grammar Check"
                    busy_label="Checking..."
                    busy=pending(state, Operation::CorrectGrammar)
                    class="btn-secondary"
                    on_click=grammar
                />
            </div>
            {move || {
                let text = correction();
                (!text.is_empty()).then(|| view! {
                    <div class="output">
                        <strong>"Corrected:"</strong>
                        <p>{text}</p>
                    </div>
                })
            }}
        </section>
    }
}
