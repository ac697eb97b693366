//! Notes grid

use leptos::*;
use notes_assistant::Note;

use crate::components::workspace_field;
use crate::state::{use_client, use_global_state};

#[component]
pub fn NotesGrid() -> impl IntoView {
    let state = use_global_state();
    let notes = move || workspace_field(state, |w| w.notes.clone());

    view! {
        <section>
            <h2>"Your Notes"</h2>
            {move || notes().is_empty().then(|| view! {
                <p class="muted">"No notes yet."</p>
            })}
            <div class="grid">
                <For
                    each=notes
                    key=|note| note.id
                    children=|note| view! { <NoteCard note=note /> }
                />
            </div>
        </section>
    }
}

#[component]
fn NoteCard(note: Note) -> impl IntoView {
    let client = use_client();
    let id = note.id;

    let delete = move |_| {
        let client = client.clone();
        spawn_local(async move {
            let _ = client.delete_note(id).await;
        });
    };

    view! {
        <article class="card note">
            <h3>{note.title}</h3>
            <p>{note.content}</p>
            <button class="btn btn-danger" on:click=delete>"Delete"</button>
        </article>
    }
}
