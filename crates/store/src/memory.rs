//! In-memory reference backend.

use std::collections::BTreeMap;
use std::sync::Arc;

use assassins_types::{Attendee, KillMethods, MethodField, Player, UserId};
use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::client::{AttendeeDirectory, GameStore, StoreSubscription};
use crate::error::Result;
use crate::event::StoreEvent;

const CHANNEL_CAPACITY: usize = 1000;

#[derive(Default)]
struct Inner {
    players: BTreeMap<UserId, Player>,
    player_methods: BTreeMap<UserId, String>,
    admin_tokens: BTreeMap<UserId, String>,
    methods: Option<KillMethods>,
    targets: bool,
    kills: usize,
}

/// In-memory game store for tests and the demo session.
///
/// Holds the same collections the real backend does and broadcasts typed
/// events on every mutation. A new subscription is primed by re-publishing a
/// snapshot of current state on the shared channel; because every event is
/// an absolute value, duplicate delivery to existing subscribers is
/// harmless.
pub struct InMemoryGameStore {
    inner: RwLock<Inner>,
    attendees: Vec<Attendee>,
    sender: broadcast::Sender<StoreEvent>,
    reject_sign_in: bool,
    reject_fetch: bool,
    token_counter: RwLock<u64>,
}

impl Default for InMemoryGameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameStore {
    /// Create an empty store with an empty directory.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: RwLock::new(Inner::default()),
            attendees: Vec::new(),
            sender,
            reject_sign_in: false,
            reject_fetch: false,
            token_counter: RwLock::new(0),
        }
    }

    /// Create a store whose directory serves the given attendees.
    pub fn with_attendees(attendees: Vec<Attendee>) -> Self {
        let mut store = Self::new();
        store.attendees = attendees;
        store
    }

    /// Create a store wrapped in an Arc.
    pub fn new_arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Make `sign_in` fail, for exercising the auth-rejected path.
    pub fn with_sign_in_rejected(mut self) -> Self {
        self.reject_sign_in = true;
        self
    }

    /// Make `fetch_attendees` fail, for exercising the unresolved-directory
    /// path.
    pub fn with_fetch_rejected(mut self) -> Self {
        self.reject_fetch = true;
        self
    }

    fn publish(&self, event: StoreEvent) {
        // No receivers is fine; mutations are fire-and-forget.
        let _ = self.sender.send(event);
    }

    async fn publish_admins(&self) {
        let inner = self.inner.read().await;
        let admins = inner.admin_tokens.keys().cloned().collect();
        drop(inner);
        self.publish(StoreEvent::AdminsChanged(admins));
    }

    /// Simulate a round starting: the targets record appears.
    pub async fn set_targets(&self) {
        self.inner.write().await.targets = true;
        self.publish(StoreEvent::TargetsChanged(true));
    }

    /// Simulate an elimination being recorded under `public/kills`.
    pub async fn record_kill(&self) {
        self.inner.write().await.kills += 1;
    }

    /// Current player roster, in id order.
    pub async fn players(&self) -> Vec<Player> {
        self.inner.read().await.players.values().cloned().collect()
    }

    /// Credential currently stored for a user, if any.
    pub async fn admin_token(&self, id: &UserId) -> Option<String> {
        self.inner.read().await.admin_tokens.get(id).cloned()
    }

    /// Stored method configuration, if any.
    pub async fn methods(&self) -> Option<KillMethods> {
        self.inner.read().await.methods.clone()
    }

    /// Whether the targets record is present.
    pub async fn has_targets(&self) -> bool {
        self.inner.read().await.targets
    }

    /// Number of records under `public/kills`.
    pub async fn kills(&self) -> usize {
        self.inner.read().await.kills
    }

    /// Method index a player submitted, if any.
    pub async fn player_method(&self, id: &UserId) -> Option<String> {
        self.inner.read().await.player_methods.get(id).cloned()
    }
}

#[async_trait]
impl AttendeeDirectory for InMemoryGameStore {
    async fn fetch_attendees(&self) -> Result<Vec<Attendee>> {
        if self.reject_fetch {
            return Err(crate::error::Error::fetch("attendee directory unavailable"));
        }
        Ok(self.attendees.clone())
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn sign_in(&self) -> Result<()> {
        if self.reject_sign_in {
            return Err(crate::error::Error::auth("sign-in rejected by backend"));
        }
        Ok(())
    }

    async fn mint_admin_token(&self) -> Result<String> {
        let mut counter = self.token_counter.write().await;
        *counter += 1;
        Ok(format!("admin-token-{counter}"))
    }

    async fn subscribe(&self) -> Result<StoreSubscription> {
        let receiver = self.sender.subscribe();
        let subscription = StoreSubscription::new(receiver);

        // Prime the new subscriber with current state, child_added-style for
        // players and value-style for the rest.
        let inner = self.inner.read().await;
        let players: Vec<Player> = inner.players.values().cloned().collect();
        let admins = inner.admin_tokens.keys().cloned().collect();
        let methods = inner.methods.clone();
        let targets = inner.targets;
        drop(inner);

        for player in players {
            self.publish(StoreEvent::PlayerAdded(player));
        }
        self.publish(StoreEvent::TargetsChanged(targets));
        self.publish(StoreEvent::AdminsChanged(admins));
        self.publish(StoreEvent::MethodsChanged(methods));

        Ok(subscription)
    }

    async fn set_player(&self, player: Player) -> Result<()> {
        debug!(id = %player.id, "set player");
        self.inner
            .write()
            .await
            .players
            .insert(player.id.clone(), player.clone());
        self.publish(StoreEvent::PlayerAdded(player));
        Ok(())
    }

    async fn remove_player(&self, id: &UserId) -> Result<()> {
        let removed = {
            let mut inner = self.inner.write().await;
            inner.player_methods.remove(id);
            inner.players.remove(id).is_some()
        };
        // Removing an absent record is a no-op and fires no event.
        if removed {
            debug!(id = %id, "removed player");
            self.publish(StoreEvent::PlayerRemoved(id.clone()));
        }
        Ok(())
    }

    async fn set_player_method(&self, id: &UserId, method_index: String) -> Result<()> {
        debug!(id = %id, method = %method_index, "set player method");
        self.inner
            .write()
            .await
            .player_methods
            .insert(id.clone(), method_index);
        Ok(())
    }

    async fn set_admin_token(&self, id: &UserId, token: String) -> Result<()> {
        self.inner
            .write()
            .await
            .admin_tokens
            .insert(id.clone(), token);
        self.publish_admins().await;
        Ok(())
    }

    async fn clear_admin_token(&self, id: &UserId) -> Result<()> {
        self.inner.write().await.admin_tokens.remove(id);
        self.publish_admins().await;
        Ok(())
    }

    async fn set_methods(&self, methods: KillMethods) -> Result<()> {
        self.inner.write().await.methods = Some(methods.clone());
        self.publish(StoreEvent::MethodsChanged(Some(methods)));
        Ok(())
    }

    async fn update_method_field(
        &self,
        index: usize,
        field: MethodField,
        value: String,
    ) -> Result<()> {
        let methods = {
            let mut inner = self.inner.write().await;
            let mut methods = inner.methods.clone().unwrap_or_default();
            methods.set_field(index, field, value).map_err(|e| {
                crate::error::Error::write("public/admin/killMethods", e.to_string())
            })?;
            inner.methods = Some(methods.clone());
            methods
        };
        self.publish(StoreEvent::MethodsChanged(Some(methods)));
        Ok(())
    }

    async fn remove_targets(&self) -> Result<()> {
        self.inner.write().await.targets = false;
        self.publish(StoreEvent::TargetsChanged(false));
        Ok(())
    }

    async fn remove_kills(&self) -> Result<()> {
        self.inner.write().await.kills = 0;
        Ok(())
    }
}
