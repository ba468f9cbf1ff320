//! Store boundary for the assassins game.
//!
//! The backing realtime store is an external collaborator; this crate pins
//! down the shape of the conversation with it:
//!
//! - **Typed events**: one [`StoreEvent`] enum covering the player roster,
//!   the targets flag, the admin set, and the method configuration, so the
//!   core consumes a single typed feed instead of per-path callbacks.
//! - **Client traits**: [`GameStore`] for the shared game state and
//!   [`AttendeeDirectory`] for the one-shot directory fetch.
//! - **Reference backend**: [`InMemoryGameStore`], used by tests and the
//!   demo binary, with Firebase-style snapshot-then-live delivery.
//!
//! Every mutation is an absolute set or remove against a semantic path;
//! there is no read-modify-write at this boundary, so concurrent admins are
//! last-write-wins at the store.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod client;
pub mod error;
pub mod event;
pub mod memory;

pub use client::{AttendeeDirectory, GameStore, StoreSubscription};
pub use error::{Error, Result};
pub use event::StoreEvent;
pub use memory::InMemoryGameStore;
