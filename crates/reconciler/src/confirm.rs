//! Confirmation prompt seam for destructive operations.

use serde::{Deserialize, Serialize};

/// A yes/no question posed to the admin before a destructive operation.
///
/// Counts are carried so the prompt can interpolate them into its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmRequest {
    /// Add every attendee in the current (filtered) non-player list.
    AddAll { count: usize },
    /// Remove every player in the current (filtered) player list.
    RemoveAll { count: usize },
    /// End the current round, deleting all targets and recorded kills.
    AbortGame { players: usize },
    /// Overwrite all four methods with the seeded defaults.
    ResetMethods,
}

impl ConfirmRequest {
    /// Default English prompt text.
    pub fn message(&self) -> String {
        match self {
            Self::AddAll { count } => {
                format!("Add all {count} attendees to the game?")
            }
            Self::RemoveAll { count } => {
                format!("Remove all {count} players from the game?")
            }
            Self::AbortGame { players } => format!(
                "Abort the game in progress? All targets and kills for {players} players will be deleted."
            ),
            Self::ResetMethods => {
                "Reset all elimination methods to their defaults?".to_owned()
            }
        }
    }
}

/// Interactive yes/no gate in front of bulk and destructive mutations.
///
/// Blocks only the calling interaction path, never the event loop. A `false`
/// answer performs no mutation.
pub trait ConfirmPrompt: Send + Sync {
    /// Ask the admin; `true` means proceed.
    fn confirm(&self, request: &ConfirmRequest) -> bool;
}

/// Prompt that approves everything. Default for headless sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&self, _request: &ConfirmRequest) -> bool {
        true
    }
}

/// Prompt that declines everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl ConfirmPrompt for NeverConfirm {
    fn confirm(&self, _request: &ConfirmRequest) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn should_interpolate_counts_into_prompt_text() {
        assert!(ConfirmRequest::AddAll { count: 7 }.message().contains('7'));
        assert!(ConfirmRequest::RemoveAll { count: 3 }.message().contains('3'));
        assert!(ConfirmRequest::AbortGame { players: 12 }.message().contains("12"));
    }

    #[test]
    fn should_answer_consistently() {
        let req = ConfirmRequest::ResetMethods;
        assert!(AlwaysConfirm.confirm(&req));
        assert!(!NeverConfirm.confirm(&req));
    }
}
