//! Wizard error types.

use crate::store::StoreError;

use super::stage::{Field, Stage};

/// Errors from wizard transitions and submission.
///
/// None of these are fatal: the draft is left untouched and the user can
/// correct the input or retry.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Required fields of the current stage are empty
    #[error("{stage} is incomplete: missing {}", join_fields(.missing))]
    Validation { stage: Stage, missing: Vec<Field> },

    /// There is no stage after the final one; submit instead
    #[error("already at the final stage")]
    NoNextStage,

    /// Submission is only possible from the final stage
    #[error("cannot submit from {0}")]
    NotAtFinalStage(Stage),

    /// The store rejected the trip
    #[error("failed to save trip: {0}")]
    Store(#[from] StoreError),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
