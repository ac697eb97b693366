//! Domain Types
//!
//! Notes, composer drafts, credentials and assist modes shared by every
//! front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A note as owned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Composer contents for a note that has not been saved yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Reset both fields to empty strings
    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

/// Email/password pair submitted to signup and login.
///
/// Never persisted. The `Debug` impl hides the password.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Prompt-shaping behavior requested from the writing assistant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
pub enum AssistMode {
    #[default]
    Default,
    Email,
    Idea,
    Casual,
}

impl AssistMode {
    pub const ALL: [AssistMode; 4] = [
        AssistMode::Default,
        AssistMode::Email,
        AssistMode::Idea,
        AssistMode::Casual,
    ];

    /// Wire value sent in the `mode` field
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistMode::Default => "default",
            AssistMode::Email => "email",
            AssistMode::Idea => "idea",
            AssistMode::Casual => "casual",
        }
    }

    /// Human-readable label for mode pickers
    pub fn label(&self) -> &'static str {
        match self {
            AssistMode::Default => "Default",
            AssistMode::Email => "Polite Email",
            AssistMode::Idea => "Idea Brainstorm",
            AssistMode::Casual => "Casual",
        }
    }
}

impl fmt::Display for AssistMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown assist mode: {0} (expected default, email, idea or casual)")]
pub struct ParseAssistModeError(pub String);

impl FromStr for AssistMode {
    type Err = ParseAssistModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The backend lowercases the mode before matching
        let normalized = s.trim().to_lowercase();
        AssistMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| ParseAssistModeError(s.to_string()))
    }
}
