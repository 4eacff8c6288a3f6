//! Volatile trip store.

use std::sync::Mutex;

use chrono::Utc;

use crate::domain::{NewTrip, TripId, TripRecord};

use super::TripStore;
use super::error::StoreError;
use super::table::TripTable;

/// A trip store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTripStore {
    table: Mutex<TripTable>,
}

impl MemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TripStore for MemoryTripStore {
    fn create(&self, trip: NewTrip) -> Result<TripId, StoreError> {
        let mut table = self.table.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(table.insert(trip, Utc::now()))
    }

    fn list(&self) -> Result<Vec<TripRecord>, StoreError> {
        let table = self.table.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(table.newest_first())
    }

    fn delete_by_id(&self, id: TripId) -> Result<(), StoreError> {
        let mut table = self.table.lock().map_err(|_| StoreError::Poisoned)?;
        table.remove(id)
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        let mut table = self.table.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(table.clear())
    }
}
