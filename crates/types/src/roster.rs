//! Attendee and player records.

use serde::{Deserialize, Serialize};

/// Unique identifier for a user, as issued by the attendee directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID from a directory id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A person in the event directory, independent of game participation.
///
/// Attendees are fetched once per session from the external directory and
/// are read-only from the core's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Attendee {
    /// Create an attendee record.
    pub fn new(id: impl Into<UserId>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Display name as shown in the roster lists.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Lowercased `(first, last)` sort key. Missing names compare as empty.
    pub fn sort_key(&self) -> (String, String) {
        (self.first_name.to_lowercase(), self.last_name.to_lowercase())
    }

    /// Whether the lowercased `"first last"` name contains the lowercased
    /// search term as a substring.
    pub fn matches_search(&self, term: &str) -> bool {
        let name = format!(
            "{} {}",
            self.first_name.to_lowercase(),
            self.last_name.to_lowercase()
        );
        name.contains(&term.to_lowercase())
    }
}

/// An attendee who has been added to the game.
///
/// A player's existence in the players collection marks the attendee as "in
/// the game"; the id is a foreign key to the directory, not an ownership
/// relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Player {
    /// Lowercased `(first, last)` sort key.
    pub fn sort_key(&self) -> (String, String) {
        (self.first_name.to_lowercase(), self.last_name.to_lowercase())
    }

    /// Whether the lowercased full name contains the lowercased term.
    pub fn matches_search(&self, term: &str) -> bool {
        let name = format!(
            "{} {}",
            self.first_name.to_lowercase(),
            self.last_name.to_lowercase()
        );
        name.contains(&term.to_lowercase())
    }
}

impl From<Attendee> for Player {
    fn from(a: Attendee) -> Self {
        Self {
            id: a.id,
            first_name: a.first_name,
            last_name: a.last_name,
        }
    }
}

impl From<&Attendee> for Player {
    fn from(a: &Attendee) -> Self {
        a.clone().into()
    }
}

/// Sort a roster in place, case-insensitively by `(first, last)` name.
///
/// The sort is stable and total: ties in both names keep their relative
/// order, and `"Bob"` and `"bob"` compare identically.
pub fn sort_roster<T, K>(roster: &mut [T], key: K)
where
    K: Fn(&T) -> (String, String),
{
    roster.sort_by_cached_key(key);
}

/// Filter a roster by a search term.
///
/// A trimmed-empty term is the identity; otherwise entries are kept when
/// their lowercased full name contains the lowercased term.
pub fn filter_by_name<'a, T, M>(roster: &'a [T], term: &str, matches: M) -> Vec<&'a T>
where
    M: Fn(&T, &str) -> bool,
{
    if term.trim().is_empty() {
        roster.iter().collect()
    } else {
        roster.iter().filter(|entry| matches(entry, term)).collect()
    }
}
