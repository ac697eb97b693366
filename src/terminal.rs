//! Terminal Presenter
//!
//! Prints notices as they happen and keeps the latest view so the CLI can
//! print it once a command finishes.

use std::cell::RefCell;
use std::fmt::Write;

use crate::model::Note;
use crate::view::{Notice, Presenter, View};

const CONTENT_PREVIEW: usize = 48;

#[derive(Debug, Default)]
pub struct TerminalPresenter {
    latest: RefCell<View>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently rendered view
    pub fn latest(&self) -> View {
        self.latest.borrow().clone()
    }
}

impl Presenter for TerminalPresenter {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(message) => println!("{}", message),
            Notice::Failure(message) => eprintln!("{}", message),
        }
    }

    fn render(&self, view: &View) {
        *self.latest.borrow_mut() = view.clone();
    }
}

/// Plain-text rendering of a view
pub fn format_view(view: &View) -> String {
    let mut out = String::new();

    let Some(workspace) = &view.workspace else {
        out.push_str("Not logged in.\n");
        out.push_str("Log in with:\n");
        out.push_str("  notes login --email <EMAIL> --password <PASSWORD>\n");
        return out;
    };

    if !workspace.composer.title.is_empty() || !workspace.composer.content.is_empty() {
        let _ = writeln!(out, "Draft: {}", workspace.composer.title);
        if !workspace.composer.content.is_empty() {
            let _ = writeln!(out, "  {}", preview(&workspace.composer.content));
        }
        out.push('\n');
    }

    if !workspace.correction.is_empty() {
        let _ = writeln!(out, "Corrected:\n  {}\n", workspace.correction);
    }

    if !workspace.assistant.output.is_empty() {
        let _ = writeln!(
            out,
            "AI Output ({}):\n  {}\n",
            workspace.assistant.mode.label(),
            workspace.assistant.output
        );
    }

    out.push_str(&format_notes(&workspace.notes));
    out
}

/// Notes as a fixed-width table
pub fn format_notes(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes yet.\n\nCreate your first note with:\n  notes add --title <TITLE> --content <CONTENT>\n"
            .to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {:<24} {}", "ID", "Title", "Content");
    let _ = writeln!(out, "{}", "-".repeat(80));
    for note in notes {
        let _ = writeln!(
            out,
            "{:<8} {:<24} {}",
            note.id,
            truncate(&note.title, 24),
            preview(&note.content)
        );
    }
    out
}

/// First line of `text`, shortened for table cells
fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let mut shown = truncate(first_line, CONTENT_PREVIEW);
    if shown.len() < text.trim_end().len() && !shown.ends_with("...") {
        shown.push_str("...");
    }
    shown
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
