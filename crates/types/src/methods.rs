//! Elimination method configuration.
//!
//! Exactly four method slots exist, indices 0..=3. The collection is never
//! partially present: when the store has nothing at the methods path, the
//! full default set is written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of elimination method slots. Fixed, not dynamically resizable.
pub const METHOD_COUNT: usize = 4;

/// Maximum title length enforced by the admin input widget (an icon glyph).
pub const TITLE_MAX_CHARS: usize = 2;

/// Maximum description length enforced by the admin input widget.
pub const DESCRIPTION_MAX_CHARS: usize = 65;

/// Maximum instructions length enforced by the admin input widget.
pub const INSTRUCTIONS_MAX_CHARS: usize = 65;

/// One configurable elimination method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillMethod {
    /// Short icon glyph shown on the method card.
    pub title: String,
    /// What this method is, shown to agents picking a method.
    pub description: String,
    /// How an agent carries out an elimination with this method.
    pub instructions: String,
}

impl KillMethod {
    /// Create a method from its three fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            instructions: instructions.into(),
        }
    }

    /// A method is incomplete when any field is empty after trimming.
    ///
    /// Display-only flag; an incomplete method never blocks a write.
    pub fn is_incomplete(&self) -> bool {
        self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.instructions.trim().is_empty()
    }
}

/// One of the three editable fields on a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodField {
    Title,
    Description,
    Instructions,
}

impl MethodField {
    /// Field name as it appears in the stored record.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Instructions => "instructions",
        }
    }
}

/// Method index outside the fixed 0..=3 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("method index {index} out of range (0..=3)")]
pub struct MethodIndexError {
    pub index: usize,
}

/// The full ordered set of exactly four methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KillMethods([KillMethod; METHOD_COUNT]);

impl KillMethods {
    /// Build from a fixed array of four methods.
    pub fn new(methods: [KillMethod; METHOD_COUNT]) -> Self {
        Self(methods)
    }

    /// Get the method at an index.
    pub fn get(&self, index: usize) -> Result<&KillMethod, MethodIndexError> {
        self.0.get(index).ok_or(MethodIndexError { index })
    }

    /// Set one field of the method at an index, leaving the others alone.
    pub fn set_field(
        &mut self,
        index: usize,
        field: MethodField,
        value: impl Into<String>,
    ) -> Result<(), MethodIndexError> {
        let method = self.0.get_mut(index).ok_or(MethodIndexError { index })?;
        match field {
            MethodField::Title => method.title = value.into(),
            MethodField::Description => method.description = value.into(),
            MethodField::Instructions => method.instructions = value.into(),
        }
        Ok(())
    }

    /// Iterate the methods in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, KillMethod> {
        self.0.iter()
    }

    /// Borrow all four methods.
    pub fn as_slice(&self) -> &[KillMethod] {
        &self.0
    }
}

impl Default for KillMethods {
    fn default() -> Self {
        default_methods()
    }
}

impl<'a> IntoIterator for &'a KillMethods {
    type Item = &'a KillMethod;
    type IntoIter = std::slice::Iter<'a, KillMethod>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The literal default method set seeded when the store has none.
///
/// The last slot is an intentionally incomplete placeholder for organizers
/// to fill in with their own method.
pub fn default_methods() -> KillMethods {
    KillMethods::new([
        KillMethod::new(
            "📇",
            "Agents eliminate their target by collecting a business card.",
            "Hand your business card to the agent who asks you for one.",
        ),
        KillMethod::new(
            "😄",
            "Agents eliminate their target by planting a sticker on them.",
            "Get a sticker onto your target without being noticed.",
        ),
        KillMethod::new(
            "📸",
            "Agents eliminate their target by taking a photo with them.",
            "Snap a photo with your target to confirm the elimination.",
        ),
        KillMethod::new("🙂", "", ""),
    ])
}
