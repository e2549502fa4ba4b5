//! Player identification, per-player storage and selections.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.
//!
//! ## Player
//!
//! What a player has chosen: a mage from their roster, the grimoires that
//! mage brings to battle, and the spell (or pass) for the current round.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::content::{GrimoireId, MageId, SpellId};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use grimoire_duel::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(2).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
///
/// ## Example
///
/// ```
/// use grimoire_duel::core::{PlayerId, PlayerMap};
///
/// let mut rounds_won: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// rounds_won[PlayerId::new(1)] += 1;
/// assert_eq!(rounds_won[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether a player ID is in range for this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a player's data, or `None` for an out-of-range ID.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a player's data mutably, or `None` for an out-of-range ID.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the stored values in player order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// A seat at the table and everything that seat has chosen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Mage fielded for this battle. `None` until chosen.
    pub selected_mage: Option<MageId>,

    /// Mages this player may field.
    pub roster: Vec<MageId>,

    /// Grimoires brought into battle.
    pub selected_grimoires: Vec<GrimoireId>,

    /// Spell chosen for the current round. `None` means pass.
    pub selected_spell: Option<SpellId>,

    /// Whether `selected_spell` is being cast as the innate version.
    pub innate_selected: bool,

    /// Set once a charge is confirmed; no further choice this round.
    pub committed: bool,
}

impl Player {
    /// Create a player with an empty roster and no selections.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            selected_mage: None,
            roster: Vec::new(),
            selected_grimoires: Vec::new(),
            selected_spell: None,
            innate_selected: false,
            committed: false,
        }
    }

    /// Set the roster (builder pattern).
    #[must_use]
    pub fn with_roster(mut self, roster: impl IntoIterator<Item = MageId>) -> Self {
        self.roster = roster.into_iter().collect();
        self
    }

    /// Check whether this player may field the given mage.
    #[must_use]
    pub fn can_field(&self, mage: &MageId) -> bool {
        self.roster.contains(mage)
    }

    /// Check whether a spell is chosen for this round.
    #[must_use]
    pub fn has_spell_selected(&self) -> bool {
        self.selected_spell.is_some()
    }

    /// Forget this round's spell choice.
    pub fn clear_spell_selection(&mut self) {
        self.selected_spell = None;
        self.innate_selected = false;
    }

    /// Spend this round's action on a charge that has already been paid for.
    pub fn commit(&mut self) {
        self.clear_spell_selection();
        self.committed = true;
    }

    /// Reopen the seat for the next round's selection.
    pub fn release_commitment(&mut self) {
        self.committed = false;
    }
}
