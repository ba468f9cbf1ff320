//! Error types for the mission crate.

use assassins_types::MethodIndexError;
use thiserror::Error;

/// Result type alias for mission operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Mission onboarding errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The mission cannot be accepted before the final briefing step has
    /// been viewed.
    #[error("briefing not complete, the final step has not been viewed")]
    BriefingIncomplete,

    /// Confirmation requires exactly one selected method.
    #[error("no elimination method selected")]
    NoSelection,

    /// Briefing step outside the carousel.
    #[error("briefing step {step} out of range")]
    StepOutOfRange { step: usize },

    /// Selection index outside the fixed 0..=3 range.
    #[error(transparent)]
    MethodIndex(#[from] MethodIndexError),

    /// The store rejected the submission.
    #[error(transparent)]
    Store(#[from] assassins_store::Error),
}
