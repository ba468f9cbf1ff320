//! Roster reconciliation core for the assassins game.
//!
//! The admin session merges independently-arriving realtime feeds - the
//! attendee directory, the player roster, the admin set, the targets flag,
//! and the method configuration - into one consistent local view, and issues
//! idempotent absolute writes back to the shared store. Key pieces:
//!
//! - **State container**: [`RosterState`] holds the merged view; all
//!   derivations (non-players, search-filtered lists) are pure functions of
//!   it.
//! - **Reconciler**: [`RosterReconciler`] drives startup (sign-in, directory
//!   fetch, subscribe), applies store events one at a time, and exposes the
//!   admin mutations.
//! - **Confirmation seam**: destructive bulk operations go through a
//!   [`ConfirmPrompt`] so the interactive yes/no lives outside the core.
//!
//! The store is the single source of truth: local state is a read-through
//! cache updated only by subscription events, never read-modify-written.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use assassins_reconciler::{AlwaysConfirm, RosterReconciler};
//! use assassins_store::InMemoryGameStore;
//!
//! #[tokio::main]
//! async fn main() -> assassins_reconciler::Result<()> {
//!     let store = Arc::new(InMemoryGameStore::new());
//!     let mut reconciler =
//!         RosterReconciler::new(store.clone(), Arc::new(AlwaysConfirm));
//!     let mut feed = reconciler.start(store.as_ref()).await?;
//!     reconciler.run(&mut feed).await
//! }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod confirm;
pub mod error;
pub mod reconciler;
pub mod state;

pub use confirm::{AlwaysConfirm, ConfirmPrompt, ConfirmRequest, NeverConfirm};
pub use error::{Error, Result};
pub use reconciler::{RosterReconciler, RosterReconcilerBuilder};
pub use state::RosterState;
