//! Error types for the store boundary.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Store boundary errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Admin sign-in was rejected; entry to the admin session is blocked.
    #[error("admin sign-in rejected: {reason}")]
    Auth { reason: String },

    /// The attendee directory fetch failed.
    #[error("attendee directory fetch failed: {reason}")]
    Fetch { reason: String },

    /// A write was rejected by the store. Non-fatal; no local rollback is
    /// needed since no optimistic state is kept.
    #[error("write to '{path}' rejected: {reason}")]
    Write { path: String, reason: String },

    /// The subscription channel closed; the session is over.
    #[error("store event channel closed")]
    ChannelClosed,

    /// The subscriber fell behind and the channel dropped events.
    #[error("store subscription lagged, {skipped} events dropped")]
    Lagged { skipped: u64 },
}

impl Error {
    /// Build an auth error.
    pub fn auth(reason: impl Into<String>) -> Self {
        Self::Auth {
            reason: reason.into(),
        }
    }

    /// Build a fetch error.
    pub fn fetch(reason: impl Into<String>) -> Self {
        Self::Fetch {
            reason: reason.into(),
        }
    }

    /// Build a write error for a semantic path.
    pub fn write(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
