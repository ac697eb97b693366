//! Session State
//!
//! The bearer token and the explicit authentication state machine derived
//! from it. There is no transition back to `Anonymous`: once authenticated,
//! the session stays authenticated for the life of the client.

use std::fmt;

/// Opaque credential sent as `Authorization: Bearer <token>`
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token. Empty or whitespace-only strings are not tokens.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Authentication state of the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(BearerToken),
}

/// Outcome of installing a token into a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Anonymous -> Authenticated
    Entered,
    /// A different token replaced the current one
    Rotated,
    /// Same token as before
    Unchanged,
}

impl Transition {
    /// Whether the notes cache must be refreshed for the new token
    pub fn requires_fetch(&self) -> bool {
        matches!(self, Transition::Entered | Transition::Rotated)
    }
}

/// Which top-level view is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Unauthenticated,
    Authenticated,
}

impl SessionState {
    /// Build the startup state from whatever the token store held
    pub fn restore(stored: Option<String>) -> Self {
        match stored.and_then(BearerToken::new) {
            Some(token) => SessionState::Authenticated(token),
            None => SessionState::Anonymous,
        }
    }

    /// Install a token, reporting how the session changed
    pub fn authenticate(&mut self, token: BearerToken) -> Transition {
        let transition = match self {
            SessionState::Anonymous => Transition::Entered,
            SessionState::Authenticated(current) if *current == token => Transition::Unchanged,
            SessionState::Authenticated(_) => Transition::Rotated,
        };
        *self = SessionState::Authenticated(token);
        transition
    }

    pub fn token(&self) -> Option<&BearerToken> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(token) => Some(token),
        }
    }

    pub fn view_state(&self) -> ViewState {
        match self {
            SessionState::Anonymous => ViewState::Unauthenticated,
            SessionState::Authenticated(_) => ViewState::Authenticated,
        }
    }
}
