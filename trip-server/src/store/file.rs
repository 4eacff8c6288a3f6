//! Trip store persisted as a JSON file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tempfile::NamedTempFile;

use crate::domain::{NewTrip, TripId, TripRecord};

use super::TripStore;
use super::error::StoreError;
use super::table::TripTable;

/// A trip store backed by a single pretty-printed JSON file.
///
/// The whole table is rewritten after every change, into a temporary file
/// beside the target that is then renamed over it. The existing file is
/// never modified in place. A change whose write fails is not applied in
/// memory either.
#[derive(Debug)]
pub struct JsonFileTripStore {
    path: PathBuf,
    table: Mutex<TripTable>,
}

impl JsonFileTripStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let table = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<TripTable>(&contents)
                .map_err(|e| StoreError::Corrupt {
                    message: format!("{}: {}", path.display(), e),
                })?
                .normalize(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => TripTable::default(),
            Err(e) => {
                return Err(StoreError::Io {
                    message: format!("failed to read {}: {}", path.display(), e),
                });
            }
        };

        tracing::info!(path = %path.display(), "opened trip store");

        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the table, persist it, then commit.
    fn mutate<T>(&self, change: impl FnOnce(&mut TripTable) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut table = self.table.lock().map_err(|_| StoreError::Poisoned)?;
        let mut next = table.clone();
        let out = change(&mut next)?;
        self.save(&next)?;
        *table = next;
        Ok(out)
    }

    fn save(&self, table: &TripTable) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Create parent directories if needed
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| StoreError::Io {
                message: format!("failed to create data directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(table).map_err(|e| StoreError::Corrupt {
            message: format!("failed to serialize trips: {}", e),
        })?;

        let write_err = |e: std::io::Error| StoreError::Io {
            message: format!("failed to write {}: {}", self.path.display(), e),
        };

        let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
        staged.write_all(json.as_bytes()).map_err(write_err)?;
        staged.as_file().sync_all().map_err(write_err)?;
        staged.persist(&self.path).map_err(|e| write_err(e.error))?;

        Ok(())
    }
}

impl TripStore for JsonFileTripStore {
    fn create(&self, trip: NewTrip) -> Result<TripId, StoreError> {
        self.mutate(|table| Ok(table.insert(trip, Utc::now())))
    }

    fn list(&self) -> Result<Vec<TripRecord>, StoreError> {
        let table = self.table.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(table.newest_first())
    }

    fn delete_by_id(&self, id: TripId) -> Result<(), StoreError> {
        self.mutate(|table| table.remove(id))
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        self.mutate(|table| Ok(table.clear()))
    }
}
