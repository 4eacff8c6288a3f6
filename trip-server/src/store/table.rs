//! The in-memory trip table shared by every store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{NewTrip, TripId, TripRecord};

use super::error::StoreError;

/// All persisted trips plus the next id to hand out.
///
/// Ids start at 1 and are never reused, even after deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TripTable {
    next_id: u64,
    trips: Vec<TripRecord>,
}

impl Default for TripTable {
    fn default() -> Self {
        Self {
            next_id: 1,
            trips: Vec::new(),
        }
    }
}

impl TripTable {
    /// Restore invariants after loading from disk.
    pub(crate) fn normalize(mut self) -> Self {
        let max_id = self.trips.iter().map(|t| t.id.0).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1).max(1);
        self
    }

    pub(crate) fn insert(&mut self, trip: NewTrip, created_at: DateTime<Utc>) -> TripId {
        let id = TripId(self.next_id);
        self.next_id += 1;
        self.trips.push(TripRecord {
            id,
            trip,
            created_at,
        });
        id
    }

    /// Newest first; trips created in the same instant are ordered by id, descending.
    pub(crate) fn newest_first(&self) -> Vec<TripRecord> {
        let mut trips = self.trips.clone();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        trips
    }

    pub(crate) fn remove(&mut self, id: TripId) -> Result<(), StoreError> {
        let before = self.trips.len();
        self.trips.retain(|t| t.id != id);
        if self.trips.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) -> usize {
        let count = self.trips.len();
        self.trips.clear();
        count
    }
}
