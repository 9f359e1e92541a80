use thiserror::Error;

use super::types::PetId;

/// Errors reported to the caller before any pet operation is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PetError {
    /// Adoption requires a name with at least one visible character.
    #[error("invalid pet name: a pet needs a non-empty name")]
    InvalidName,

    /// Free-roam time outside the accepted window.
    #[error("invalid minutes: {0} (expected 1-30)")]
    InvalidMinutes(u32),

    /// Item violates the catalog invariants (zero effect or no compatible pets).
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// Returned when looking up a pet that is not (or no longer) adopted.
    #[error("pet not found: {0}")]
    UnknownPet(PetId),

    /// Returned when an action needs a selected pet and none is selected.
    #[error("no pet selected")]
    NoPetSelected,

    /// Menu position that does not name an adopted pet.
    #[error("no pet at position {0}")]
    InvalidSelection(usize),
}

/// Failures raised inside a timed operation. These never reach the caller;
/// the operation boundary logs them and reports an aborted outcome instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActivityError {
    /// The suspend was interrupted by a cancellation request.
    #[error("activity cancelled")]
    Cancelled,

    /// The item handed to the pet cannot be applied.
    #[error("invalid item: {0}")]
    InvalidItem(String),
}
