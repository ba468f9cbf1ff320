//! Seed configuration for the demo session.

use std::path::Path;

use anyhow::{Context, Result};
use assassins_types::Attendee;
use serde::Deserialize;

/// Attendee directory seed, loaded from a TOML file.
///
/// ```toml
/// [[attendees]]
/// id = "1"
/// first_name = "Ann"
/// last_name = "Lee"
/// ```
#[derive(Debug, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

impl Seed {
    /// Load a seed file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
    }

    /// Built-in directory used when no seed file is given.
    pub fn builtin() -> Self {
        Self {
            attendees: vec![
                Attendee::new("1", "Ann", "Lee"),
                Attendee::new("2", "Bob", "Ng"),
                Attendee::new("3", "Cal", "Ode"),
                Attendee::new("4", "Dee", "Park"),
            ],
        }
    }
}
