//! Error types for the reconciler crate.

use assassins_types::MethodIndexError;
use thiserror::Error;

/// Result type alias for reconciler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reconciler errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The store rejected an operation.
    #[error(transparent)]
    Store(#[from] assassins_store::Error),

    /// Roster writes are rejected while a round is live, not merely
    /// disabled in the UI.
    #[error("roster cannot change while a game is in progress")]
    GameInProgress,

    /// Method index outside the fixed 0..=3 range.
    #[error(transparent)]
    MethodIndex(#[from] MethodIndexError),

    /// The attendee directory has not resolved yet.
    #[error("attendee directory not loaded")]
    NotLoaded,
}
