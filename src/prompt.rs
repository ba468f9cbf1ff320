//! Interactive confirmation prompt on stdin.

use std::io::{BufRead, Write};

use assassins_reconciler::{ConfirmPrompt, ConfirmRequest};
use tracing::warn;

/// Blocking yes/no prompt on the terminal.
///
/// Blocks only the calling interaction path; anything other than an
/// explicit yes counts as a decline.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, request: &ConfirmRequest) -> bool {
        let mut stdout = std::io::stdout();
        if write!(stdout, "{} [y/N] ", request.message())
            .and_then(|()| stdout.flush())
            .is_err()
        {
            warn!("could not write confirmation prompt, declining");
            return false;
        }

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
