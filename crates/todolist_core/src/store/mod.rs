//! Key-value persistence for to-do records.
//!
//! # Responsibility
//! - Define the `TodoStore` contract used by the service layer.
//! - Keep file format and I/O details out of list orchestration.
//!
//! # Invariants
//! - `put` always replaces the whole record; there is no partial update.
//! - Deleting an absent key is a no-op, never an error.
//! - Mutations are durable once the call returns.

use crate::model::todo::{TodoId, TodoRecord};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

pub mod json_store;

pub use json_store::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for file I/O, decoding and lookups.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
    NotFound(TodoId),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "store i/o failed: {err}"),
            Self::Json(err) => write!(f, "store file is not valid json: {err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Flat key-value store of to-do records.
pub trait TodoStore {
    /// Inserts or fully overwrites the record at `id`.
    fn put(&mut self, id: TodoId, record: TodoRecord) -> StoreResult<()>;
    /// Returns the record at `id`, or `StoreError::NotFound`.
    fn get(&self, id: TodoId) -> StoreResult<TodoRecord>;
    /// Removes `id`. Returns whether a record was actually removed.
    fn delete(&mut self, id: TodoId) -> StoreResult<bool>;
    /// All ids in store enumeration order.
    fn keys(&self) -> Vec<TodoId>;

    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
