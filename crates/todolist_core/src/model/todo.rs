//! To-do record model.
//!
//! # Responsibility
//! - Define the value stored per key in the JSON store.
//! - Provide input clamping and timestamp helpers used on creation.
//!
//! # Invariants
//! - `text` is clamped to `MAX_TEXT_CHARS` scalar values at input time.
//! - Whitespace-only input never produces a record.
//! - Toggling touches `completed` only.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Stable identifier for one to-do record; also the store key.
pub type TodoId = Uuid;

/// Maximum number of characters kept from user input.
pub const MAX_TEXT_CHARS: usize = 65;

/// Format of persisted timestamps: ISO-8601 local time with microseconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Persisted value for one to-do entry.
///
/// Missing fields decode to their defaults so files written by older
/// builds (or by hand) still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    #[serde(default)]
    pub text: String,
    /// ISO-8601 creation time. Compared as a string.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoRecord {
    /// Creates an open record stamped with the current local time.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_timestamp(text, now_timestamp())
    }

    /// Creates an open record with a caller-provided timestamp.
    ///
    /// Used by tests and import paths where creation time already exists.
    pub fn with_timestamp(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: timestamp.into(),
            completed: false,
        }
    }

    /// Returns a copy with only the completion flag replaced.
    pub fn with_completed(&self, completed: bool) -> Self {
        Self {
            completed,
            ..self.clone()
        }
    }

    /// Case-insensitive substring match against an already-lowercased needle.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.text.to_lowercase().contains(needle_lower)
    }
}

/// A record paired with its store key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub record: TodoRecord,
}

impl Todo {
    pub fn new(id: TodoId, record: TodoRecord) -> Self {
        Self { id, record }
    }

    /// Display ordering: newest timestamp first, then id ascending.
    pub fn newest_first(a: &Todo, b: &Todo) -> Ordering {
        b.record
            .timestamp
            .cmp(&a.record.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Generates a fresh record id.
pub fn new_todo_id() -> TodoId {
    Uuid::new_v4()
}

/// Current local time in the persisted timestamp format.
pub fn now_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Truncates raw input to at most `max_chars` characters.
///
/// Counts Unicode scalar values, never splits a code point.
pub fn clamp_input(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((byte_index, _)) => input[..byte_index].to_string(),
        None => input.to_string(),
    }
}

/// Whether input would be rejected as an empty submission.
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}
