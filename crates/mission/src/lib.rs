//! Mission onboarding state for the mobile surface.
//!
//! Two small state machines backing the player-facing screens, kept free of
//! any rendering concern:
//!
//! - [`Briefing`]: the fixed four-step mission briefing carousel. The
//!   accept gate opens only once the final step has been viewed.
//! - [`MethodSelect`]: the elimination-method picker. Exactly one of the
//!   four methods must be selected, and confirmation submits the chosen
//!   index - as a string - onto the player's record.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod briefing;
pub mod error;
pub mod select;

pub use briefing::{Briefing, BRIEFING_STEPS};
pub use error::{Error, Result};
pub use select::MethodSelect;
