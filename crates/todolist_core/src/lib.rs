//! Core logic for the todolist app.
//! This crate owns persistence and the list projection; presentation
//! layers only call into `TodoService`.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, ListOptions, SearchOrder, TodoConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo::{clamp_input, Todo, TodoId, TodoRecord, MAX_TEXT_CHARS};
pub use service::todo_service::{ServiceResult, TodoService, TodoServiceError};
pub use store::{JsonFileStore, StoreError, StoreResult, TodoStore};
pub use view::{ListEvent, ListState, TodoRow, VisibleList};

/// Opens the configured JSON store and builds a loaded service.
pub fn open_service(config: &TodoConfig) -> Result<TodoService<JsonFileStore>, OpenError> {
    // Why: validate first so a bad config never creates a data file on disk.
    config.validate()?;
    let store = JsonFileStore::open(&config.data_file)?;
    let mut service = TodoService::with_options(store, config.list_options());
    service.load()?;
    Ok(service)
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Startup failure from [`open_service`].
#[derive(Debug)]
pub enum OpenError {
    Config(ConfigError),
    Service(TodoServiceError),
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for OpenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<ConfigError> for OpenError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StoreError> for OpenError {
    fn from(value: StoreError) -> Self {
        Self::Service(TodoServiceError::Store(value))
    }
}

impl From<TodoServiceError> for OpenError {
    fn from(value: TodoServiceError) -> Self {
        Self::Service(value)
    }
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
