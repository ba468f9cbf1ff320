//! Typed store events.

use std::collections::BTreeSet;

use assassins_types::{KillMethods, Player, UserId};
use serde::{Deserialize, Serialize};

/// One change notification from the backing store.
///
/// The feeds are independent and eventually consistent; no ordering is
/// guaranteed across variants. On subscribe the backend first delivers a
/// snapshot of current state (one `PlayerAdded` per existing player plus one
/// of each value variant), then live changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// A player record appeared at `public/users/{id}`.
    PlayerAdded(Player),
    /// The player record at `public/users/{id}` was removed.
    PlayerRemoved(UserId),
    /// Presence of the `public/admin/targets` record changed. `true` means
    /// a round is live.
    TargetsChanged(bool),
    /// The set of user ids holding a truthy admin token changed.
    AdminsChanged(BTreeSet<UserId>),
    /// The method configuration at `public/admin/killMethods` changed.
    /// `None` means the collection is absent and the defaults should be
    /// written back.
    MethodsChanged(Option<KillMethods>),
}

impl StoreEvent {
    /// Short event name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PlayerAdded(_) => "player_added",
            Self::PlayerRemoved(_) => "player_removed",
            Self::TargetsChanged(_) => "targets_changed",
            Self::AdminsChanged(_) => "admins_changed",
            Self::MethodsChanged(_) => "methods_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn should_name_each_event_kind() {
        let player = Player {
            id: UserId::new("1"),
            first_name: "Ann".into(),
            last_name: "Lee".into(),
        };
        assert_eq!(StoreEvent::PlayerAdded(player).kind(), "player_added");
        assert_eq!(StoreEvent::PlayerRemoved(UserId::new("1")).kind(), "player_removed");
        assert_eq!(StoreEvent::TargetsChanged(true).kind(), "targets_changed");
        assert_eq!(StoreEvent::AdminsChanged(BTreeSet::new()).kind(), "admins_changed");
        assert_eq!(StoreEvent::MethodsChanged(None).kind(), "methods_changed");
    }

    #[test]
    fn should_round_trip_events_through_json() {
        let event = StoreEvent::TargetsChanged(true);
        let json = serde_json::to_string(&event).unwrap();
        let back: StoreEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
