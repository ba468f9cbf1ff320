//! Data model for the assassins mini-game.
//!
//! This crate holds the record shapes shared by the admin core and the
//! mobile mission surface:
//!
//! - **Attendees and players**: directory records and the subset currently
//!   in the game, with the case-insensitive name ordering and search filter
//!   both surfaces use.
//! - **Elimination methods**: the fixed set of exactly four configurable
//!   methods, with the seeded defaults.
//!
//! Everything here is plain data; persistence and sync live behind the
//! store boundary in `assassins-store`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod methods;
pub mod roster;

pub use methods::{
    default_methods, KillMethod, KillMethods, MethodField, MethodIndexError, METHOD_COUNT,
    DESCRIPTION_MAX_CHARS, INSTRUCTIONS_MAX_CHARS, TITLE_MAX_CHARS,
};
pub use roster::{filter_by_name, sort_roster, Attendee, Player, UserId};
