//! Request Lifecycles
//!
//! Tracks pending/succeeded/failed status and in-flight counts per operation.
//! Duplicate requests are counted, never suppressed.

use std::collections::HashMap;

/// A user-triggered remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Signup,
    Login,
    FetchNotes,
    SubmitNote,
    DeleteNote,
    CorrectGrammar,
    Assist,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Signup,
        Operation::Login,
        Operation::FetchNotes,
        Operation::SubmitNote,
        Operation::DeleteNote,
        Operation::CorrectGrammar,
        Operation::Assist,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Signup => "signup",
            Operation::Login => "login",
            Operation::FetchNotes => "fetch_notes",
            Operation::SubmitNote => "submit_note",
            Operation::DeleteNote => "delete_note",
            Operation::CorrectGrammar => "correct_grammar",
            Operation::Assist => "assist",
        }
    }

    /// Generic notice shown for any failure of this operation
    pub fn failure_notice(&self) -> &'static str {
        match self {
            Operation::Signup => "Signup failed",
            Operation::Login => "Login failed",
            Operation::FetchNotes => "Could not fetch notes",
            Operation::SubmitNote => "Note creation failed",
            Operation::DeleteNote => "Delete failed",
            Operation::CorrectGrammar => "Grammar correction failed",
            Operation::Assist => "AI assist failed",
        }
    }

    /// Notice shown on success, for operations that announce it
    pub fn success_notice(&self) -> Option<&'static str> {
        match self {
            Operation::Signup => Some("Signup successful. You can now log in."),
            Operation::Login => Some("Login successful"),
            _ => None,
        }
    }
}

/// Status of the most recent request of an operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    pub status: RequestStatus,
    /// Requests issued and not yet resolved
    pub in_flight: usize,
    /// Requests issued since startup
    pub issued: u64,
}

/// Lifecycle of every operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lifecycles {
    entries: HashMap<Operation, Lifecycle>,
}

impl Lifecycles {
    /// Record a request being issued; returns the in-flight count including it
    pub fn begin(&mut self, op: Operation) -> usize {
        let entry = self.entries.entry(op).or_default();
        entry.in_flight += 1;
        entry.issued += 1;
        entry.status = RequestStatus::Pending;
        entry.in_flight
    }

    /// Record a request resolving.
    ///
    /// The status stays `Pending` while other requests of the same operation
    /// are still in flight.
    pub fn finish(&mut self, op: Operation, succeeded: bool) {
        let entry = self.entries.entry(op).or_default();
        entry.in_flight = entry.in_flight.saturating_sub(1);
        if entry.in_flight == 0 {
            entry.status = if succeeded {
                RequestStatus::Succeeded
            } else {
                RequestStatus::Failed
            };
        }
    }

    pub fn get(&self, op: Operation) -> Lifecycle {
        self.entries.get(&op).copied().unwrap_or_default()
    }

    pub fn is_pending(&self, op: Operation) -> bool {
        self.get(op).status == RequestStatus::Pending
    }
}
