//! Client traits for the backing store and the attendee directory.

use assassins_types::{Attendee, KillMethods, MethodField, Player, UserId};
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::{Error, Result};
use crate::event::StoreEvent;

/// Live feed of [`StoreEvent`]s for one admin or player session.
#[derive(Debug)]
pub struct StoreSubscription {
    receiver: broadcast::Receiver<StoreEvent>,
}

impl StoreSubscription {
    /// Wrap a broadcast receiver.
    pub fn new(receiver: broadcast::Receiver<StoreEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event, waiting if none is pending.
    pub async fn recv(&mut self) -> Result<StoreEvent> {
        self.receiver.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => Error::ChannelClosed,
            broadcast::error::RecvError::Lagged(skipped) => Error::Lagged { skipped },
        })
    }

    /// Try to receive an event without waiting. `Ok(None)` means the feed
    /// is idle; a closed channel is still an error.
    pub fn try_recv(&mut self) -> Result<Option<StoreEvent>> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => Err(Error::Lagged { skipped }),
            Err(broadcast::error::TryRecvError::Closed) => Err(Error::ChannelClosed),
        }
    }
}

/// One-shot directory service the attendee list is fetched from.
///
/// Separate from [`GameStore`]: the directory belongs to the event platform,
/// not to the game's realtime state.
#[async_trait]
pub trait AttendeeDirectory: Send + Sync {
    /// Fetch the full attendee directory. Called once per session.
    async fn fetch_attendees(&self) -> Result<Vec<Attendee>>;
}

/// The shared realtime game store.
///
/// All writes are absolute sets or removes against a semantic path and are
/// idempotent: re-adding an existing player overwrites in place, removing an
/// absent record is a no-op.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Authenticate the admin session. Suspends until resolved.
    async fn sign_in(&self) -> Result<()>;

    /// Mint a long-lived admin credential for [`GameStore::set_admin_token`].
    async fn mint_admin_token(&self) -> Result<String>;

    /// Subscribe to the event feed. The backend delivers a snapshot of
    /// current state first, then live changes.
    async fn subscribe(&self) -> Result<StoreSubscription>;

    /// Write a player record at `public/users/{id}`.
    async fn set_player(&self, player: Player) -> Result<()>;

    /// Remove the player record at `public/users/{id}`.
    async fn remove_player(&self, id: &UserId) -> Result<()>;

    /// Write the chosen method index (stringified) onto the player's record
    /// at `public/users/{id}/killMethod`.
    async fn set_player_method(&self, id: &UserId, method_index: String) -> Result<()>;

    /// Write a credential at `private/adminableUsers/{id}/adminToken`.
    async fn set_admin_token(&self, id: &UserId, token: String) -> Result<()>;

    /// Remove the credential at `private/adminableUsers/{id}/adminToken`.
    async fn clear_admin_token(&self, id: &UserId) -> Result<()>;

    /// Overwrite the whole method collection at `public/admin/killMethods`.
    async fn set_methods(&self, methods: KillMethods) -> Result<()>;

    /// Update one field of one method, leaving the rest of the record alone.
    async fn update_method_field(
        &self,
        index: usize,
        field: MethodField,
        value: String,
    ) -> Result<()>;

    /// Remove the `public/admin/targets` record (ends the round).
    async fn remove_targets(&self) -> Result<()>;

    /// Remove the entire `public/kills` collection.
    async fn remove_kills(&self) -> Result<()>;
}
