//! Failure modes of the planning pipeline.

use thiserror::Error;

use super::types::Assignment;

/// Errors raised while annotating units or allocating the target load.
///
/// Validation errors abort the whole planning call before any allocation
/// is attempted. `UnmetDemand` is raised only after every unit has been
/// considered and carries both the unmet remainder and the partial
/// allocation built so far, so the caller decides whether to expose it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("invalid unit \"{name}\": {reason}")]
    InvalidUnit { name: String, reason: String },

    #[error("fuel price \"{fuel}\" missing from request")]
    MissingFuelPrice { fuel: &'static str },

    #[error("demand exceeds fleet capacity, {remaining} MWh unmet")]
    UnmetDemand {
        /// Load left unserved after running every unit considered at max.
        remaining: f64,
        /// Assignments made before capacity ran out, including the final
        /// unit at its maximum output.
        partial: Vec<Assignment>,
    },
}
