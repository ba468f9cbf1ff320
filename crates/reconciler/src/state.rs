//! Merged roster state and its derivations.

use std::collections::{BTreeSet, HashSet};

use assassins_types::{sort_roster, Attendee, KillMethods, Player, UserId};
use itertools::Itertools;

/// Local view of the shared game state.
///
/// A read-through cache: mutated only from store subscription events (via
/// the reconciler), never read-modify-written against the store. The two
/// search terms filter the add pool and the remove pool independently.
#[derive(Debug, Clone)]
pub struct RosterState {
    /// `None` until the one-shot directory fetch resolves.
    attendees: Option<Vec<Attendee>>,
    players: Vec<Player>,
    admins: BTreeSet<UserId>,
    methods: KillMethods,
    game_in_progress: bool,
    search_add: String,
    search_remove: String,
}

impl Default for RosterState {
    fn default() -> Self {
        Self {
            attendees: None,
            players: Vec::new(),
            admins: BTreeSet::new(),
            methods: KillMethods::default(),
            // Assume a round is live until the first targets event says
            // otherwise; keeps roster writes locked while state is unknown.
            game_in_progress: true,
            search_add: String::new(),
            search_remove: String::new(),
        }
    }
}

impl RosterState {
    /// Fresh pre-fetch state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the directory is still loading. Render nothing but a loading
    /// indicator while this holds.
    pub fn is_loading(&self) -> bool {
        self.attendees.is_none()
    }

    /// The sorted directory, once fetched.
    pub fn attendees(&self) -> Option<&[Attendee]> {
        self.attendees.as_deref()
    }

    /// Current players, sorted by name.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Ids currently holding an admin token.
    pub fn admins(&self) -> &BTreeSet<UserId> {
        &self.admins
    }

    /// Whether a user holds an admin token. Independent of player status.
    pub fn is_admin(&self, id: &UserId) -> bool {
        self.admins.contains(id)
    }

    /// Current method configuration.
    pub fn methods(&self) -> &KillMethods {
        &self.methods
    }

    /// Whether a round is currently live.
    pub fn game_in_progress(&self) -> bool {
        self.game_in_progress
    }

    /// Search term filtering the add pool.
    pub fn search_add(&self) -> &str {
        &self.search_add
    }

    /// Search term filtering the remove pool.
    pub fn search_remove(&self) -> &str {
        &self.search_remove
    }

    /// Whether the directory knows this id.
    pub fn has_attendee(&self, id: &UserId) -> bool {
        self.attendees
            .as_ref()
            .is_some_and(|attendees| attendees.iter().any(|a| &a.id == id))
    }

    /// Attendees not currently in the game: `attendees - players` by id.
    /// `None` while the directory is loading.
    pub fn non_players(&self) -> Option<Vec<&Attendee>> {
        let attendees = self.attendees.as_ref()?;
        let player_ids: HashSet<&UserId> = self.players.iter().map(|p| &p.id).collect();
        Some(
            attendees
                .iter()
                .filter(|a| !player_ids.contains(&a.id))
                .collect_vec(),
        )
    }

    /// Non-players matching the add-pool search term.
    pub fn filtered_non_players(&self) -> Option<Vec<&Attendee>> {
        let non_players = self.non_players()?;
        if self.search_add.trim().is_empty() {
            return Some(non_players);
        }
        Some(
            non_players
                .into_iter()
                .filter(|a| a.matches_search(&self.search_add))
                .collect_vec(),
        )
    }

    /// Players matching the remove-pool search term.
    pub fn filtered_players(&self) -> Vec<&Player> {
        if self.search_remove.trim().is_empty() {
            return self.players.iter().collect_vec();
        }
        self.players
            .iter()
            .filter(|p| p.matches_search(&self.search_remove))
            .collect_vec()
    }

    pub(crate) fn set_attendees(&mut self, mut attendees: Vec<Attendee>) {
        sort_roster(&mut attendees, Attendee::sort_key);
        self.attendees = Some(attendees);
    }

    /// Insert or replace a player by id, keeping the roster name-sorted.
    pub(crate) fn upsert_player(&mut self, player: Player) {
        self.players.retain(|p| p.id != player.id);
        self.players.push(player);
        sort_roster(&mut self.players, Player::sort_key);
    }

    pub(crate) fn remove_player(&mut self, id: &UserId) {
        self.players.retain(|p| &p.id != id);
    }

    pub(crate) fn set_admins(&mut self, admins: BTreeSet<UserId>) {
        self.admins = admins;
    }

    pub(crate) fn set_methods(&mut self, methods: KillMethods) {
        self.methods = methods;
    }

    pub(crate) fn set_game_in_progress(&mut self, in_progress: bool) {
        self.game_in_progress = in_progress;
    }

    pub(crate) fn set_search_add(&mut self, term: impl Into<String>) {
        self.search_add = term.into();
    }

    pub(crate) fn set_search_remove(&mut self, term: impl Into<String>) {
        self.search_remove = term.into();
    }

    pub(crate) fn clear_searches(&mut self) {
        self.search_add.clear();
        self.search_remove.clear();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn attendee(id: &str, first: &str, last: &str) -> Attendee {
        Attendee::new(id, first, last)
    }

    fn loaded_state(attendees: Vec<Attendee>) -> RosterState {
        let mut state = RosterState::new();
        state.set_attendees(attendees);
        state
    }

    #[test]
    fn should_start_loading_with_game_assumed_live() {
        let state = RosterState::new();
        assert!(state.is_loading());
        assert!(state.game_in_progress(), "locked until targets feed reports");
        assert!(state.non_players().is_none());
    }

    #[test]
    fn should_derive_non_players_as_set_difference() {
        let mut state = loaded_state(vec![
            attendee("1", "Ann", "Lee"),
            attendee("2", "bob", "Ng"),
            attendee("3", "Cal", "Ode"),
        ]);
        state.upsert_player(attendee("2", "bob", "Ng").into());

        let non_players = state.non_players().unwrap();
        let ids: Vec<_> = non_players.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        // Disjointness: no non-player is a player.
        assert!(non_players.iter().all(|a| !state
            .players()
            .iter()
            .any(|p| p.id == a.id)));
    }

    #[test]
    fn should_filter_the_two_pools_independently() {
        let mut state = loaded_state(vec![
            attendee("1", "Ann", "Lee"),
            attendee("2", "bob", "Ng"),
        ]);
        state.upsert_player(attendee("2", "bob", "Ng").into());
        state.set_search_add("an");
        state.set_search_remove("zzz");

        let add_pool = state.filtered_non_players().unwrap();
        assert_eq!(add_pool.len(), 1);
        assert_eq!(add_pool[0].id.as_str(), "1");
        assert!(state.filtered_players().is_empty(), "remove pool has its own term");
    }

    #[test]
    fn should_treat_whitespace_search_as_unfiltered() {
        let mut state = loaded_state(vec![attendee("1", "Ann", "Lee")]);
        state.set_search_add("  \t");
        assert_eq!(state.filtered_non_players().unwrap().len(), 1);
    }

    #[test]
    fn should_keep_roster_sorted_across_upserts() {
        let mut state = loaded_state(vec![]);
        state.upsert_player(attendee("2", "bob", "Ng").into());
        state.upsert_player(attendee("1", "Ann", "Lee").into());
        state.upsert_player(attendee("3", "ann", "Byrne").into());

        let ids: Vec<_> = state.players().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn should_replace_player_on_same_id() {
        let mut state = loaded_state(vec![]);
        state.upsert_player(attendee("1", "Ann", "Lee").into());
        state.upsert_player(attendee("1", "Annabel", "Lee").into());

        assert_eq!(state.players().len(), 1);
        assert_eq!(state.players()[0].first_name, "Annabel");
    }

    #[test]
    fn should_track_admins_independently_of_players() {
        let mut state = loaded_state(vec![attendee("1", "Ann", "Lee")]);
        state.set_admins([UserId::new("1"), UserId::new("99")].into());

        assert!(state.is_admin(&UserId::new("1")));
        assert!(state.is_admin(&UserId::new("99")), "admin need not be a player");
        assert!(!state.is_admin(&UserId::new("2")));
    }

    #[test]
    fn should_clear_both_search_terms() {
        let mut state = RosterState::new();
        state.set_search_add("ann");
        state.set_search_remove("bob");
        state.clear_searches();
        assert!(state.search_add().is_empty());
        assert!(state.search_remove().is_empty());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn roster() -> impl Strategy<Value = (Vec<Attendee>, Vec<usize>)> {
            prop::collection::vec(("[a-z]{0,6}", "[a-z]{0,6}"), 1..30).prop_flat_map(|names| {
                let len = names.len();
                let attendees: Vec<Attendee> = names
                    .into_iter()
                    .enumerate()
                    .map(|(i, (first, last))| Attendee::new(i.to_string(), first, last))
                    .collect();
                (Just(attendees), prop::collection::vec(0..len, 0..len))
            })
        }

        proptest! {
            #[test]
            fn non_players_is_the_set_difference((attendees, picks) in roster()) {
                let mut state = loaded_state(attendees.clone());
                for &i in &picks {
                    state.upsert_player(attendees[i].clone().into());
                }

                let player_ids: std::collections::HashSet<&UserId> =
                    state.players().iter().map(|p| &p.id).collect();
                let non_players = state.non_players().unwrap();

                // Every directory entry lands on exactly one side.
                prop_assert_eq!(
                    non_players.len() + player_ids.len(),
                    attendees.len()
                );
                prop_assert!(non_players.iter().all(|a| !player_ids.contains(&a.id)));
            }

            #[test]
            fn filtering_a_filtered_pool_is_stable(
                (attendees, picks) in roster(),
                term in "[a-z]{0,3}",
            ) {
                let mut state = loaded_state(attendees.clone());
                for &i in &picks {
                    state.upsert_player(attendees[i].clone().into());
                }
                state.set_search_add(term.clone());

                let once: Vec<Attendee> = state
                    .filtered_non_players()
                    .unwrap()
                    .into_iter()
                    .cloned()
                    .collect();
                let refiltered: Vec<&Attendee> = if term.trim().is_empty() {
                    once.iter().collect()
                } else {
                    once.iter().filter(|a| a.matches_search(&term)).collect()
                };
                prop_assert_eq!(once.len(), refiltered.len());
            }
        }
    }
}
