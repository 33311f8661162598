//! Ordered projection of records as rendered rows.
//!
//! # Responsibility
//! - Hold the rows the presentation layer currently shows.
//! - Offer two explicit update paths: full rebuild and incremental top insert.
//! - Queue post-render events for the presentation layer to drain.
//!
//! # Invariants
//! - The list is never the source of truth; the store is.
//! - Every row carries the id of the record it renders.

use crate::model::todo::{Todo, TodoId};

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

impl From<&Todo> for TodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            text: todo.record.text.clone(),
            completed: todo.record.completed,
        }
    }
}

/// What the visible list currently represents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    /// Nothing has been loaded yet.
    #[default]
    Empty,
    /// Every stored record, newest first.
    Loaded,
    /// Only records matching the normalized query.
    Filtered { query: String },
}

/// Work the presentation layer runs after applying the current mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// Bring the first row into view.
    ScrollToTop,
}

#[derive(Debug, Default)]
pub struct VisibleList {
    rows: Vec<TodoRow>,
    state: ListState,
    pending: Vec<ListEvent>,
}

impl VisibleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[TodoRow] {
        &self.rows
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: TodoId) -> Option<&TodoRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Discards every row and renders `rows` in order.
    pub fn rebuild(&mut self, rows: Vec<TodoRow>, state: ListState) {
        self.rows = rows;
        self.state = state;
    }

    /// Renders one row above all others without touching the rest.
    pub fn insert_top(&mut self, row: TodoRow) {
        self.rows.insert(0, row);
    }

    /// Removes the row rendering `id`. Returns whether one was present.
    pub fn remove(&mut self, id: TodoId) -> bool {
        match self.rows.iter().position(|row| row.id == id) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    /// Updates the checkbox state of the row rendering `id`.
    pub fn set_completed(&mut self, id: TodoId, completed: bool) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.completed = completed;
                true
            }
            None => false,
        }
    }

    pub fn schedule(&mut self, event: ListEvent) {
        if !self.pending.contains(&event) {
            self.pending.push(event);
        }
    }

    /// Hands queued post-render events to the caller, oldest first.
    pub fn take_events(&mut self) -> Vec<ListEvent> {
        std::mem::take(&mut self.pending)
    }
}
