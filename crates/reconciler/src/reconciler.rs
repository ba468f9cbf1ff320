//! The roster reconciler.

use std::sync::Arc;

use assassins_types::{default_methods, Attendee, MethodField, MethodIndexError, UserId, METHOD_COUNT};
use assassins_store::{AttendeeDirectory, GameStore, StoreEvent, StoreSubscription};
use tracing::{debug, info, warn};

use crate::confirm::{AlwaysConfirm, ConfirmPrompt, ConfirmRequest};
use crate::error::{Error, Result};
use crate::state::RosterState;

/// Merges the realtime feeds into a [`RosterState`] and issues the admin
/// mutations as idempotent absolute writes.
///
/// Single logical thread of control: events are applied one at a time, each
/// processed to completion before the next. No ordering is assumed across
/// the feeds.
pub struct RosterReconciler {
    /// Shared store, the single source of truth.
    store: Arc<dyn GameStore>,
    /// Yes/no gate for bulk and destructive mutations.
    confirm: Arc<dyn ConfirmPrompt>,
    /// Local merged view.
    state: RosterState,
}

impl RosterReconciler {
    /// Create a reconciler over a store with a confirmation prompt.
    pub fn new(store: Arc<dyn GameStore>, confirm: Arc<dyn ConfirmPrompt>) -> Self {
        Self {
            store,
            confirm,
            state: RosterState::new(),
        }
    }

    /// The current merged view.
    pub fn state(&self) -> &RosterState {
        &self.state
    }

    /// Start the admin session: authenticate, fetch and sort the directory,
    /// then open the live feed.
    ///
    /// A sign-in rejection blocks entry; a directory failure leaves the
    /// state in perpetual loading.
    pub async fn start(&mut self, directory: &dyn AttendeeDirectory) -> Result<StoreSubscription> {
        self.store.sign_in().await?;
        info!("admin session signed in");

        let attendees = directory.fetch_attendees().await?;
        info!(attendees = attendees.len(), "attendee directory resolved");
        self.state.set_attendees(attendees);

        Ok(self.store.subscribe().await?)
    }

    /// Apply one store event to the local view.
    ///
    /// Orphaned players (no matching attendee) are purged by issuing a
    /// remove write rather than surfacing an error; an absent method
    /// collection triggers a write-back of the defaults.
    pub async fn apply(&mut self, event: StoreEvent) -> Result<()> {
        debug!(kind = event.kind(), "applying store event");
        match event {
            StoreEvent::PlayerAdded(player) => {
                if self.state.is_loading() || self.state.has_attendee(&player.id) {
                    self.state.upsert_player(player);
                } else {
                    debug!(id = %player.id, "purging orphaned player");
                    self.store.remove_player(&player.id).await?;
                }
            }
            StoreEvent::PlayerRemoved(id) => {
                self.state.remove_player(&id);
            }
            StoreEvent::TargetsChanged(in_progress) => {
                self.state.set_game_in_progress(in_progress);
            }
            StoreEvent::AdminsChanged(admins) => {
                self.state.set_admins(admins);
            }
            StoreEvent::MethodsChanged(Some(methods)) => {
                self.state.set_methods(methods);
            }
            StoreEvent::MethodsChanged(None) => {
                // Create on missing, not an error.
                info!("method collection absent, seeding defaults");
                self.store.set_methods(default_methods()).await?;
            }
        }
        Ok(())
    }

    /// Drain the live feed until the channel closes.
    ///
    /// A lagged subscription is logged and skipped over; every event is an
    /// absolute value, so the next delivery re-converges the view.
    pub async fn run(&mut self, subscription: &mut StoreSubscription) -> Result<()> {
        loop {
            match subscription.recv().await {
                Ok(event) => self.apply(event).await?,
                Err(assassins_store::Error::Lagged { skipped }) => {
                    warn!(skipped, "subscription lagged, continuing");
                }
                Err(assassins_store::Error::ChannelClosed) => {
                    info!("store feed closed, session over");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn ensure_roster_unlocked(&self) -> Result<()> {
        if self.state.game_in_progress() {
            return Err(Error::GameInProgress);
        }
        Ok(())
    }

    /// Add one attendee to the game. Idempotent: re-adding overwrites the
    /// same record. Rejected while a round is live.
    pub async fn add_player(&mut self, attendee: &Attendee) -> Result<()> {
        self.ensure_roster_unlocked()?;
        self.store.set_player(attendee.into()).await?;
        Ok(())
    }

    /// Remove one player from the game. Idempotent. Rejected while a round
    /// is live.
    pub async fn remove_player(&mut self, id: &UserId) -> Result<()> {
        self.ensure_roster_unlocked()?;
        self.store.remove_player(id).await?;
        Ok(())
    }

    /// Add every attendee in the current filtered add pool, after
    /// confirmation. Clears both search terms on confirm. Returns whether
    /// the operation ran.
    pub async fn add_all_players(&mut self) -> Result<bool> {
        self.ensure_roster_unlocked()?;
        let pool: Vec<Attendee> = self
            .state
            .filtered_non_players()
            .ok_or(Error::NotLoaded)?
            .into_iter()
            .cloned()
            .collect();

        if !self.confirm.confirm(&ConfirmRequest::AddAll { count: pool.len() }) {
            return Ok(false);
        }

        info!(count = pool.len(), "adding all non-players");
        for attendee in &pool {
            self.store.set_player(attendee.into()).await?;
        }
        self.state.clear_searches();
        Ok(true)
    }

    /// Remove every player in the current filtered remove pool, after
    /// confirmation. Clears both search terms on confirm. Returns whether
    /// the operation ran.
    pub async fn remove_all_players(&mut self) -> Result<bool> {
        self.ensure_roster_unlocked()?;
        let pool: Vec<UserId> = self
            .state
            .filtered_players()
            .into_iter()
            .map(|p| p.id.clone())
            .collect();

        if !self
            .confirm
            .confirm(&ConfirmRequest::RemoveAll { count: pool.len() })
        {
            return Ok(false);
        }

        info!(count = pool.len(), "removing all players");
        for id in &pool {
            self.store.remove_player(id).await?;
        }
        self.state.clear_searches();
        Ok(true)
    }

    /// Grant or revoke admin privilege for a user. Granting mints a
    /// long-lived credential and writes it to the user's private record;
    /// revoking deletes it. Idempotent either way, and independent of
    /// player membership.
    pub async fn set_admin(&mut self, id: &UserId, is_admin: bool) -> Result<()> {
        if is_admin {
            let token = self.store.mint_admin_token().await?;
            self.store.set_admin_token(id, token).await?;
            info!(id = %id, "granted admin");
        } else {
            self.store.clear_admin_token(id).await?;
            info!(id = %id, "revoked admin");
        }
        Ok(())
    }

    /// Abort the round in progress, after confirmation: deletes the kills
    /// collection and the targets record. Returns whether it ran.
    pub async fn abort_game(&mut self) -> Result<bool> {
        let players = self.state.players().len();
        if !self.confirm.confirm(&ConfirmRequest::AbortGame { players }) {
            return Ok(false);
        }

        warn!(players, "aborting game in progress");
        self.store.remove_kills().await?;
        self.store.remove_targets().await?;
        Ok(true)
    }

    /// Partially update one field of the method at `index`.
    ///
    /// The index is bounds-checked; the value is not length-checked here,
    /// the input layer owns the 2/65/65 limits.
    pub async fn update_method_field(
        &mut self,
        index: usize,
        field: MethodField,
        value: impl Into<String>,
    ) -> Result<()> {
        if index >= METHOD_COUNT {
            return Err(MethodIndexError { index }.into());
        }
        self.store
            .update_method_field(index, field, value.into())
            .await?;
        Ok(())
    }

    /// Overwrite all four methods with the seeded defaults, after
    /// confirmation. Returns whether it ran.
    pub async fn reset_methods(&mut self) -> Result<bool> {
        if !self.confirm.confirm(&ConfirmRequest::ResetMethods) {
            return Ok(false);
        }
        self.store.set_methods(default_methods()).await?;
        Ok(true)
    }

    /// Set the add-pool search term.
    pub fn set_search_add(&mut self, term: impl Into<String>) {
        self.state.set_search_add(term);
    }

    /// Set the remove-pool search term.
    pub fn set_search_remove(&mut self, term: impl Into<String>) {
        self.state.set_search_remove(term);
    }
}

/// Builder for [`RosterReconciler`].
pub struct RosterReconcilerBuilder {
    store: Option<Arc<dyn GameStore>>,
    confirm: Arc<dyn ConfirmPrompt>,
}

impl RosterReconcilerBuilder {
    /// Create a new builder. The prompt defaults to [`AlwaysConfirm`].
    pub fn new() -> Self {
        Self {
            store: None,
            confirm: Arc::new(AlwaysConfirm),
        }
    }

    /// Set the store.
    pub fn with_store(mut self, store: Arc<dyn GameStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the confirmation prompt.
    pub fn with_confirm(mut self, confirm: Arc<dyn ConfirmPrompt>) -> Self {
        self.confirm = confirm;
        self
    }

    /// Build the reconciler.
    pub fn build(self) -> Result<RosterReconciler> {
        let store = self.store.ok_or_else(|| {
            Error::Store(assassins_store::Error::write(
                "builder",
                "a game store is required",
            ))
        })?;
        Ok(RosterReconciler::new(store, self.confirm))
    }
}

impl Default for RosterReconcilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use assassins_store::InMemoryGameStore;
    use assassins_types::Player;

    fn attendee(id: &str, first: &str, last: &str) -> Attendee {
        Attendee::new(id, first, last)
    }

    async fn started(
        store: Arc<InMemoryGameStore>,
        confirm: Arc<dyn ConfirmPrompt>,
    ) -> (RosterReconciler, StoreSubscription) {
        let mut reconciler = RosterReconciler::new(store.clone(), confirm);
        let sub = reconciler.start(store.as_ref()).await.unwrap();
        (reconciler, sub)
    }

    async fn drain(reconciler: &mut RosterReconciler, sub: &mut StoreSubscription) {
        while let Ok(Some(event)) = sub.try_recv() {
            reconciler.apply(event).await.unwrap();
        }
    }

    #[tokio::test]
    async fn should_block_entry_on_rejected_sign_in() {
        let store = Arc::new(InMemoryGameStore::new().with_sign_in_rejected());
        let mut reconciler = RosterReconciler::new(store.clone(), Arc::new(AlwaysConfirm));

        let err = reconciler.start(store.as_ref()).await.unwrap_err();
        assert!(matches!(err, Error::Store(assassins_store::Error::Auth { .. })));
        assert!(reconciler.state().is_loading(), "no directory was fetched");
    }

    #[tokio::test]
    async fn should_stay_loading_when_directory_fetch_fails() {
        let store = Arc::new(InMemoryGameStore::new().with_fetch_rejected());
        let mut reconciler = RosterReconciler::new(store.clone(), Arc::new(AlwaysConfirm));

        let err = reconciler.start(store.as_ref()).await.unwrap_err();
        assert!(matches!(err, Error::Store(assassins_store::Error::Fetch { .. })));
        assert!(reconciler.state().is_loading(), "view never leaves loading");
        assert!(reconciler.state().non_players().is_none());
    }

    #[tokio::test]
    async fn should_unlock_roster_once_targets_report_absent() {
        let store = Arc::new(InMemoryGameStore::with_attendees(vec![attendee(
            "1", "Ann", "Lee",
        )]));
        let (mut reconciler, mut sub) = started(store, Arc::new(AlwaysConfirm)).await;

        assert!(reconciler.state().game_in_progress(), "pessimistic default");
        drain(&mut reconciler, &mut sub).await;
        assert!(!reconciler.state().game_in_progress());
    }

    #[tokio::test]
    async fn should_reject_roster_writes_while_round_is_live() {
        let store = Arc::new(InMemoryGameStore::with_attendees(vec![attendee(
            "1", "Ann", "Lee",
        )]));
        let (mut reconciler, _sub) = started(store, Arc::new(AlwaysConfirm)).await;

        // Targets event not yet applied: still assumed live.
        let ann = attendee("1", "Ann", "Lee");
        assert_eq!(reconciler.add_player(&ann).await, Err(Error::GameInProgress));
        assert_eq!(
            reconciler.remove_player(&ann.id).await,
            Err(Error::GameInProgress)
        );
        assert_eq!(reconciler.add_all_players().await, Err(Error::GameInProgress));
    }

    #[tokio::test]
    async fn should_purge_orphaned_player_instead_of_adopting_it() {
        let store = Arc::new(InMemoryGameStore::with_attendees(vec![attendee(
            "1", "Ann", "Lee",
        )]));
        // A stale roster record exists for someone not in the directory.
        store
            .set_player(Player {
                id: UserId::new("ghost"),
                first_name: "Gone".into(),
                last_name: "Person".into(),
            })
            .await
            .unwrap();

        let (mut reconciler, mut sub) = started(store.clone(), Arc::new(AlwaysConfirm)).await;
        drain(&mut reconciler, &mut sub).await;

        assert!(reconciler.state().players().is_empty());
        assert!(store.players().await.is_empty(), "purge wrote the remove");
    }

    #[tokio::test]
    async fn should_seed_default_methods_when_collection_absent() {
        let store = Arc::new(InMemoryGameStore::with_attendees(vec![]));
        let (mut reconciler, mut sub) = started(store.clone(), Arc::new(AlwaysConfirm)).await;

        // Snapshot contains MethodsChanged(None); applying it writes the
        // defaults back, and the echo carries the seeded set.
        drain(&mut reconciler, &mut sub).await;

        assert_eq!(store.methods().await, Some(default_methods()));
        assert_eq!(reconciler.state().methods(), &default_methods());
    }

    #[tokio::test]
    async fn should_require_store_in_builder() {
        assert!(RosterReconcilerBuilder::new().build().is_err());

        let store: Arc<dyn GameStore> = Arc::new(InMemoryGameStore::new());
        assert!(RosterReconcilerBuilder::new()
            .with_store(store)
            .build()
            .is_ok());
    }

    #[tokio::test]
    async fn should_reject_method_update_out_of_range_without_writing() {
        let store = Arc::new(InMemoryGameStore::new());
        let mut reconciler = RosterReconciler::new(store.clone(), Arc::new(AlwaysConfirm));

        let err = reconciler
            .update_method_field(METHOD_COUNT, MethodField::Title, "x")
            .await
            .unwrap_err();
        assert_eq!(err, Error::MethodIndex(MethodIndexError { index: METHOD_COUNT }));
        assert_eq!(store.methods().await, None);
    }
}
