//! Trip persistence.
//!
//! [`TripStore`] is the seam between the wizard/web layer and storage.
//! [`MemoryTripStore`] is volatile; [`JsonFileTripStore`] keeps trips in a
//! JSON file across restarts.

mod error;
mod file;
mod memory;
mod table;

pub use error::StoreError;
pub use file::JsonFileTripStore;
pub use memory::MemoryTripStore;

use crate::domain::{NewTrip, TripId, TripRecord};

/// Storage for submitted trips.
pub trait TripStore: Send + Sync {
    /// Persist a trip, returning its newly assigned id.
    fn create(&self, trip: NewTrip) -> Result<TripId, StoreError>;

    /// All trips, newest first.
    fn list(&self) -> Result<Vec<TripRecord>, StoreError>;

    /// Delete one trip. Fails with [`StoreError::NotFound`] if no trip matched.
    fn delete_by_id(&self, id: TripId) -> Result<(), StoreError>;

    /// Delete every trip, returning how many were removed.
    fn delete_all(&self) -> Result<usize, StoreError>;
}
