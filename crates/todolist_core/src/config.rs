//! Runtime configuration for the to-do core.
//!
//! # Responsibility
//! - Carry the data file location and list behavior knobs.
//! - Reject values the service cannot honor before anything is opened.

use crate::model::todo::MAX_TEXT_CHARS;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATA_FILE: &str = "todos.json";

/// Row order used when rendering search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    /// Newest first, same as a full reload.
    #[default]
    Timestamp,
    /// Store enumeration order.
    StoreOrder,
}

impl FromStr for SearchOrder {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "timestamp" | "newest" => Ok(Self::Timestamp),
            "store" | "store_order" => Ok(Self::StoreOrder),
            other => Err(ConfigError::UnknownSearchOrder(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDataPath,
    ZeroTextLimit,
    UnknownSearchOrder(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDataPath => write!(f, "data file path cannot be empty"),
            Self::ZeroTextLimit => write!(f, "max_text_chars must be greater than zero"),
            Self::UnknownSearchOrder(value) => write!(
                f,
                "unsupported search order `{value}`; expected timestamp|store"
            ),
        }
    }
}

impl Error for ConfigError {}

/// List behavior consumed by `TodoService`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub max_text_chars: usize,
    pub search_order: SearchOrder,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            max_text_chars: MAX_TEXT_CHARS,
            search_order: SearchOrder::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    pub data_file: PathBuf,
    pub max_text_chars: usize,
    pub search_order: SearchOrder,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            max_text_chars: MAX_TEXT_CHARS,
            search_order: SearchOrder::default(),
        }
    }
}

impl TodoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataPath);
        }
        if self.max_text_chars == 0 {
            return Err(ConfigError::ZeroTextLimit);
        }
        Ok(())
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            max_text_chars: self.max_text_chars,
            search_order: self.search_order,
        }
    }
}
