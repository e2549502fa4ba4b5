//! Game state: the single mutable root of a battle.
//!
//! ## GameState
//!
//! Everything the engine reads or writes is reached through one value:
//! - Phase and battle sub-phase
//! - Players and their selections
//! - Content tables (mage health and magia are live here)
//! - Round counter, turn order, winner
//! - Per-player remaining spell uses
//! - Combat log and charging spells
//!
//! State is plain data. It clones cheaply enough for what-if analysis and
//! round-trips through `bincode` for snapshots.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::phase::{BattlePhase, GamePhase};
use super::player::{Player, PlayerId, PlayerMap};
use crate::combat::ChargingTracker;
use crate::content::{ContentTables, Mage, MageId, SpellId};
use crate::error::{ActionError, SnapshotError};
use crate::events::{CombatLog, EventSink, GameEvent};

/// Remaining casts of one spell for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellUses {
    Unlimited,
    Remaining(u32),
}

impl SpellUses {
    /// Uses for a spell with the given per-battle limit.
    #[must_use]
    pub fn from_limit(limit: Option<u32>) -> Self {
        limit.map_or(Self::Unlimited, Self::Remaining)
    }

    /// True if at least one cast is left.
    #[must_use]
    pub fn available(self) -> bool {
        !matches!(self, Self::Remaining(0))
    }

    /// Spend one use, flooring at zero.
    #[must_use]
    pub fn consumed(self) -> Self {
        match self {
            Self::Unlimited => Self::Unlimited,
            Self::Remaining(n) => Self::Remaining(n.saturating_sub(1)),
        }
    }
}

/// Complete battle state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub battle_phase: BattlePhase,

    /// Seats, in input order.
    pub players: PlayerMap<Player>,

    /// Mage, spell and grimoire definitions.
    pub content: ContentTables,

    /// Current round. 0 until the battle starts.
    pub round: u32,

    /// Players with a mage, by descending agility. Fixed at battle start.
    pub turn_order: Vec<PlayerId>,

    pub winner: Option<PlayerId>,

    /// Remaining uses per player per grimoire spell.
    pub spell_uses: PlayerMap<FxHashMap<SpellId, SpellUses>>,

    pub log: CombatLog,

    pub charging: ChargingTracker,
}

impl GameState {
    /// Create a state in the preparation phase.
    ///
    /// Player ids are reassigned to match seat order.
    #[must_use]
    pub fn new(content: ContentTables, players: Vec<Player>) -> Self {
        let count = players.len();
        let players = PlayerMap::new(count, |id| {
            let mut player = players[id.index()].clone();
            player.id = id;
            player
        });

        Self {
            phase: GamePhase::Preparation,
            battle_phase: BattlePhase::SpellSelection,
            players,
            content,
            round: 0,
            turn_order: Vec::new(),
            winner: None,
            spell_uses: PlayerMap::with_default(count),
            log: CombatLog::new(),
            charging: ChargingTracker::new(),
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players.get(player)
    }

    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(player)
    }

    /// Id of the mage a player has fielded.
    #[must_use]
    pub fn selected_mage_id(&self, player: PlayerId) -> Option<&MageId> {
        self.players.get(player)?.selected_mage.as_ref()
    }

    /// The mage a player has fielded.
    pub fn selected_mage(&self, player: PlayerId) -> Result<&Mage, ActionError> {
        let id = self
            .selected_mage_id(player)
            .ok_or(ActionError::NoMageSelected(player))?;
        Ok(self.content.mage(id)?)
    }

    /// The opponent of `player`: the first other seat with a fielded mage.
    ///
    /// Every targeting decision goes through here.
    #[must_use]
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(id, p)| *id != player && p.selected_mage.is_some())
            .map(|(id, _)| id)
    }

    /// Recompute turn order: seats with an existing fielded mage, stable
    /// sorted by descending agility.
    pub fn compute_turn_order(&mut self) -> &[PlayerId] {
        let mut order: Vec<(PlayerId, i64)> = self
            .player_ids()
            .filter_map(|p| self.selected_mage(p).ok().map(|m| (p, m.agility)))
            .collect();
        order.sort_by(|a, b| b.1.cmp(&a.1));

        self.turn_order = order.into_iter().map(|(p, _)| p).collect();
        &self.turn_order
    }

    /// Fill the uses table from each player's selected grimoires.
    pub fn snapshot_spell_uses(&mut self) {
        let content = &self.content;
        for (id, player) in self.players.iter() {
            let table = &mut self.spell_uses[id];
            table.clear();
            for spell in content.spells_in(&player.selected_grimoires) {
                table.insert(spell.id.clone(), SpellUses::from_limit(spell.uses_per_battle));
            }
        }
    }

    /// Remaining uses of a spell.
    ///
    /// A spell the player did not bring in a grimoire has no uses.
    #[must_use]
    pub fn uses_remaining(&self, player: PlayerId, spell: &SpellId) -> SpellUses {
        self.spell_uses
            .get(player)
            .and_then(|t| t.get(spell))
            .copied()
            .unwrap_or(SpellUses::Remaining(0))
    }

    /// Fail if the player has no casts of `spell` left.
    pub fn check_uses(&self, player: PlayerId, spell: &SpellId) -> Result<(), ActionError> {
        if self.uses_remaining(player, spell).available() {
            Ok(())
        } else {
            Err(ActionError::NoUsesRemaining {
                spell: spell.clone(),
            })
        }
    }

    /// Spend one use of a spell, flooring at zero.
    pub fn consume_use(&mut self, player: PlayerId, spell: &SpellId) {
        if let Some(uses) = self
            .spell_uses
            .get_mut(player)
            .and_then(|t| t.get_mut(spell))
        {
            *uses = uses.consumed();
        }
    }

    /// Append an event to the combat log.
    pub fn emit(&mut self, event: GameEvent) {
        EventSink::emit(&mut self.log, event);
    }

    /// Clear every player's spell selection.
    pub fn clear_spell_selections(&mut self) {
        for (_, player) in self.players.iter_mut() {
            player.clear_spell_selection();
        }
    }

    /// Let every player choose again.
    pub fn release_commitments(&mut self) {
        for (_, player) in self.players.iter_mut() {
            player.release_commitment();
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Encode the whole state.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    /// Decode a state produced by [`snapshot`](Self::snapshot).
    pub fn restore(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }
}
