//! Store error types.

use crate::domain::TripId;

/// Errors from trip persistence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// No trip has the given id
    #[error("trip {0} not found")]
    NotFound(TripId),

    /// Reading or writing the backing file failed
    #[error("storage I/O error: {message}")]
    Io { message: String },

    /// The backing file could not be parsed
    #[error("corrupt trip data: {message}")]
    Corrupt { message: String },

    /// A writer panicked while holding the store lock
    #[error("trip store lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(StoreError::NotFound(TripId(4)).to_string(), "trip 4 not found");
        assert_eq!(
            StoreError::Io {
                message: "disk full".into()
            }
            .to_string(),
            "storage I/O error: disk full"
        );
    }
}
