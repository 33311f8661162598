//! JSON file-backed `TodoStore`.
//!
//! # Responsibility
//! - Load the whole key-value file on open and keep it in memory.
//! - Rewrite the file after every mutation.
//!
//! # Invariants
//! - The file is one JSON object keyed by UUID strings.
//! - Key order in the file is the store enumeration order; new keys append.
//! - A write either fully replaces the file or leaves the old one intact.

use super::{StoreError, StoreResult, TodoStore};
use crate::model::todo::{TodoId, TodoRecord};
use indexmap::IndexMap;
use log::{debug, error, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Key-value store persisted as a single JSON object.
#[derive(Debug)]
pub struct JsonFileStore {
    path: Option<PathBuf>,
    entries: IndexMap<TodoId, TodoRecord>,
}

impl JsonFileStore {
    /// Opens the store at `path`, creating an empty file when absent.
    ///
    /// # Errors
    /// - `Io` when the file or its parent directory cannot be created/read.
    /// - `Json` when the file is not a JSON object of records.
    /// - `InvalidData` when a key is not a UUID.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=file");

        match load_entries(&path) {
            Ok(entries) => {
                info!(
                    "event=store_open module=store status=ok mode=file records={} duration_ms={}",
                    entries.len(),
                    started_at.elapsed().as_millis()
                );
                let store = Self {
                    path: Some(path),
                    entries,
                };
                Ok(store)
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Creates a store with no backing file. Mutations stay in memory.
    pub fn in_memory() -> Self {
        info!("event=store_open module=store status=ok mode=memory records=0");
        Self {
            path: None,
            entries: IndexMap::new(),
        }
    }

    /// Backing file, or `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn sync(&self) -> StoreResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let bytes = serde_json::to_vec(&self.entries)?;
        atomic_write(path, &bytes).map_err(|err| {
            error!(
                "event=store_sync module=store status=error records={} error={}",
                self.entries.len(),
                err
            );
            StoreError::from(err)
        })
    }
}

impl TodoStore for JsonFileStore {
    fn put(&mut self, id: TodoId, record: TodoRecord) -> StoreResult<()> {
        let previous = self.entries.insert(id, record);
        if let Err(err) = self.sync() {
            // Memory must not run ahead of the file.
            match previous {
                Some(record) => {
                    self.entries.insert(id, record);
                }
                None => {
                    self.entries.shift_remove(&id);
                }
            }
            return Err(err);
        }
        debug!("event=store_put module=store status=ok id={id}");
        Ok(())
    }

    fn get(&self, id: TodoId) -> StoreResult<TodoRecord> {
        self.entries
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn delete(&mut self, id: TodoId) -> StoreResult<bool> {
        let Some((index, key, record)) = self.entries.shift_remove_full(&id) else {
            debug!("event=store_delete module=store status=skipped reason=absent id={id}");
            return Ok(false);
        };
        if let Err(err) = self.sync() {
            self.entries.shift_insert(index, key, record);
            return Err(err);
        }
        debug!("event=store_delete module=store status=ok id={id}");
        Ok(true)
    }

    fn keys(&self) -> Vec<TodoId> {
        self.entries.keys().copied().collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

fn load_entries(path: &Path) -> StoreResult<IndexMap<TodoId, TodoRecord>> {
    if !path.exists() {
        if let Some(parent) = parent_dir(path) {
            fs::create_dir_all(parent)?;
        }
        atomic_write(path, b"{}")?;
        return Ok(IndexMap::new());
    }

    let bytes = fs::read(path)?;
    // Why: an interrupted first run can leave a zero-length file; treat it
    // like a missing one instead of refusing to start.
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(IndexMap::new());
    }

    let raw: IndexMap<String, TodoRecord> = serde_json::from_slice(&bytes)?;
    let mut entries = IndexMap::with_capacity(raw.len());
    for (key, record) in raw {
        let id = Uuid::parse_str(&key)
            .map_err(|_| StoreError::InvalidData(format!("invalid todo id `{key}`")))?;
        entries.insert(id, record);
    }
    Ok(entries)
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}

// Why: the whole map is rewritten on every mutation; writing in place could
// leave a truncated file behind, while rename swaps old for new in one step.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = parent_dir(path).unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
