//! Elimination-method selection state.

use assassins_store::GameStore;
use assassins_types::{KillMethod, KillMethods, MethodIndexError, UserId, METHOD_COUNT};
use tracing::info;

use crate::error::{Error, Result};

/// State of the method-selection screen.
///
/// The four methods are presented as a grid; exactly one must be selected
/// before NEXT is enabled. Confirmation submits the chosen index as a
/// string onto the player's record.
#[derive(Debug, Clone, Default)]
pub struct MethodSelect {
    selection: Option<usize>,
}

impl MethodSelect {
    /// No method selected yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected method index, if any.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Select the method at `index`, replacing any previous selection.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= METHOD_COUNT {
            return Err(MethodIndexError { index }.into());
        }
        self.selection = Some(index);
        Ok(())
    }

    /// Whether NEXT is enabled: exactly one method is selected.
    pub fn can_confirm(&self) -> bool {
        self.selection.is_some()
    }

    /// The selected method's record out of the configured set.
    pub fn selected_method<'a>(&self, methods: &'a KillMethods) -> Option<&'a KillMethod> {
        self.selection.and_then(|i| methods.get(i).ok())
    }

    /// Submit the selection: writes the chosen index, stringified, onto the
    /// player's record.
    pub async fn confirm(&self, store: &dyn GameStore, player: &UserId) -> Result<()> {
        let index = self.selection.ok_or(Error::NoSelection)?;
        info!(player = %player, method = index, "submitting elimination method");
        store.set_player_method(player, index.to_string()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use assassins_store::InMemoryGameStore;

    use super::*;

    #[test]
    fn should_require_a_selection_before_confirm_is_enabled() {
        let mut select = MethodSelect::new();
        assert!(!select.can_confirm());
        select.select(2).unwrap();
        assert!(select.can_confirm());
    }

    #[test]
    fn should_replace_a_previous_selection() {
        let mut select = MethodSelect::new();
        select.select(0).unwrap();
        select.select(3).unwrap();
        assert_eq!(select.selection(), Some(3));
    }

    #[test]
    fn should_reject_selection_outside_the_grid() {
        let mut select = MethodSelect::new();
        assert!(select.select(METHOD_COUNT).is_err());
        assert_eq!(select.selection(), None);
    }

    #[test]
    fn should_look_up_the_selected_record() {
        let methods = assassins_types::default_methods();
        let mut select = MethodSelect::new();
        assert!(select.selected_method(&methods).is_none());
        select.select(2).unwrap();
        assert_eq!(select.selected_method(&methods).map(|m| m.title.as_str()), Some("📸"));
    }

    #[tokio::test]
    async fn should_refuse_to_confirm_without_a_selection() {
        let store = InMemoryGameStore::new();
        let select = MethodSelect::new();
        let err = select
            .confirm(&store, &UserId::new("1"))
            .await
            .unwrap_err();
        assert_eq!(err, Error::NoSelection);
    }

    #[tokio::test]
    async fn should_submit_the_index_as_a_string() {
        let store = InMemoryGameStore::new();
        let player = UserId::new("1");
        let mut select = MethodSelect::new();
        select.select(2).unwrap();

        select.confirm(&store, &player).await.unwrap();
        assert_eq!(store.player_method(&player).await, Some("2".to_owned()));
    }
}
