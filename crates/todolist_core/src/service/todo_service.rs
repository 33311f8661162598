//! To-do list controller.
//!
//! # Responsibility
//! - Keep the visible list consistent with the store across add, toggle,
//!   delete, search and reload.
//! - Apply input rules (length cap, blank rejection) before persistence.
//!
//! # Invariants
//! - Full reload renders every record newest first.
//! - Add inserts one row at the top without re-reading the store.
//! - Toggle rewrites the stored record with its original text and timestamp.
//! - A missing record on toggle/delete never fails the call.

use crate::config::{ListOptions, SearchOrder};
use crate::model::todo::{clamp_input, is_blank, new_todo_id, Todo, TodoId, TodoRecord};
use crate::store::{StoreError, StoreResult, TodoStore};
use crate::view::{ListEvent, ListState, TodoRow, VisibleList};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, TodoServiceError>;

#[derive(Debug)]
pub enum TodoServiceError {
    /// Submitted text was empty or whitespace only.
    EmptyInput,
    Store(StoreError),
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "todo text cannot be empty"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyInput => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for TodoServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Owns the store handle and the list projection shown to the user.
///
/// Constructed once at startup and handed to the presentation layer by
/// reference; all methods run on the caller's thread.
pub struct TodoService<S: TodoStore> {
    store: S,
    list: VisibleList,
    options: ListOptions,
}

impl<S: TodoStore> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self::with_options(store, ListOptions::default())
    }

    pub fn with_options(store: S, options: ListOptions) -> Self {
        Self {
            store,
            list: VisibleList::new(),
            options,
        }
    }

    /// Startup load. Same contract as [`TodoService::reload`].
    pub fn load(&mut self) -> ServiceResult<&[TodoRow]> {
        self.reload()
    }

    /// Re-reads every record and rebuilds the list newest first.
    pub fn reload(&mut self) -> ServiceResult<&[TodoRow]> {
        let mut todos = self.read_all()?;
        todos.sort_by(Todo::newest_first);

        let rows = todos.iter().map(TodoRow::from).collect::<Vec<_>>();
        info!(
            "event=list_reload module=service status=ok rows={}",
            rows.len()
        );
        self.list.rebuild(rows, ListState::Loaded);
        Ok(self.list.rows())
    }

    /// Creates a record from raw input and shows it at the top.
    ///
    /// Input is capped to `max_text_chars` first; text is stored untrimmed.
    ///
    /// # Errors
    /// - `EmptyInput` when nothing but whitespace remains. No record is created.
    /// - `Store` when persisting fails; the list is left untouched.
    pub fn add(&mut self, input: &str) -> ServiceResult<TodoRow> {
        let text = clamp_input(input, self.options.max_text_chars);
        if is_blank(&text) {
            debug!("event=todo_add module=service status=skipped reason=empty_input");
            return Err(TodoServiceError::EmptyInput);
        }

        let todo = Todo::new(new_todo_id(), TodoRecord::new(text));
        self.store.put(todo.id, todo.record.clone())?;

        let row = TodoRow::from(&todo);
        self.list.insert_top(row.clone());
        self.list.schedule(ListEvent::ScrollToTop);
        info!(
            "event=todo_add module=service status=ok id={} chars={}",
            todo.id,
            todo.record.text.chars().count()
        );
        Ok(row)
    }

    /// Persists a new completion state for `id`.
    ///
    /// The visible row follows `completed` even when the record is gone.
    /// Returns whether the store was updated.
    pub fn toggle(&mut self, id: TodoId, completed: bool) -> ServiceResult<bool> {
        self.list.set_completed(id, completed);

        let record = match self.store.get(id) {
            Ok(record) => record,
            Err(StoreError::NotFound(_)) => {
                debug!("event=todo_toggle module=service status=skipped reason=not_found id={id}");
                return Ok(false);
            }
            Err(err) => return Err(err.into()),
        };

        self.store.put(id, record.with_completed(completed))?;
        info!("event=todo_toggle module=service status=ok id={id} completed={completed}");
        Ok(true)
    }

    /// Deletes `id` from the store and drops its row.
    ///
    /// Returns whether a stored record was removed.
    pub fn delete(&mut self, id: TodoId) -> ServiceResult<bool> {
        let removed = self.store.delete(id)?;
        self.list.remove(id);
        info!("event=todo_delete module=service status=ok id={id} removed={removed}");
        Ok(removed)
    }

    /// Narrows the list to records whose text contains `query`.
    ///
    /// The query is trimmed and lowercased. A blank query performs a full
    /// reload instead.
    pub fn search(&mut self, query: &str) -> ServiceResult<&[TodoRow]> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.reload();
        }

        let mut matches = self
            .read_all()?
            .into_iter()
            .filter(|todo| todo.record.matches(&needle))
            .collect::<Vec<_>>();
        if self.options.search_order == SearchOrder::Timestamp {
            matches.sort_by(Todo::newest_first);
        }

        let rows = matches.iter().map(TodoRow::from).collect::<Vec<_>>();
        info!(
            "event=list_search module=service status=ok rows={} query_chars={}",
            rows.len(),
            needle.chars().count()
        );
        self.list.rebuild(rows, ListState::Filtered { query: needle });
        self.list.schedule(ListEvent::ScrollToTop);
        Ok(self.list.rows())
    }

    pub fn rows(&self) -> &[TodoRow] {
        self.list.rows()
    }

    pub fn state(&self) -> &ListState {
        self.list.state()
    }

    pub fn options(&self) -> ListOptions {
        self.options
    }

    /// Number of records in the store, regardless of any active filter.
    pub fn record_count(&self) -> usize {
        self.store.len()
    }

    /// Drains events the presentation layer must run after rendering.
    pub fn take_post_render_events(&mut self) -> Vec<ListEvent> {
        self.list.take_events()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_all(&self) -> StoreResult<Vec<Todo>> {
        self.store
            .keys()
            .into_iter()
            .map(|id| self.store.get(id).map(|record| Todo::new(id, record)))
            .collect()
    }
}
