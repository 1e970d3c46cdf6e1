//! Main expense store API
//!
//! This module provides the primary interface for interacting with an
//! expense database.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;

use crate::database::Database;
use crate::error::{Result, StoreError};

/// Where the backing database lives
enum Location {
    Disk(PathBuf),
    Memory,
}

/// Main expense store interface
///
/// Construct one store per database and share it; every operation goes
/// through the same lazily-initialized handle. The first operation (or
/// an explicit [`initialize`](Self::initialize)) opens the database and
/// runs pending migrations exactly once, even under concurrent first
/// use: callers arriving while initialization is in flight wait on the
/// same slot instead of racing to open and migrate independently. A
/// failed initialization leaves the slot empty, so a later call retries
/// from scratch instead of returning a permanently broken handle.
pub struct ExpenseStore {
    location: Location,
    db: Mutex<Option<Database>>,
}

impl ExpenseStore {
    /// Create a store backed by the database file at `path`
    ///
    /// The file is not touched until the first operation runs.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::Disk(path.into()),
            db: Mutex::new(None),
        }
    }

    /// Create a store backed by a private in-memory database
    pub fn open_in_memory() -> Self {
        Self {
            location: Location::Memory,
            db: Mutex::new(None),
        }
    }

    /// Open and migrate the database now instead of on first use
    pub fn initialize(&self) -> Result<()> {
        self.with_db(|_| Ok(()))
    }

    /// The database file path (`None` for in-memory stores)
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::Disk(path) => Some(path),
            Location::Memory => None,
        }
    }

    /// Run `f` against the ready database handle, initializing it first
    /// if needed
    pub(crate) fn with_db<T>(&self, f: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        let mut slot = self.db.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if slot.is_none() {
            let db = match &self.location {
                Location::Disk(path) => Database::open(path),
                Location::Memory => Database::open_in_memory(),
            }
            .map_err(|e| StoreError::StorageUnavailable(e.to_string()))?;
            debug!("expense store initialized");
            *slot = Some(db);
        }

        let db = slot
            .as_mut()
            .ok_or_else(|| StoreError::StorageUnavailable("database not open".to_string()))?;
        f(db)
    }
}
