//! The battle controller: commands in, events out.
//!
//! `Battle` owns the [`GameState`], the random source and the
//! configuration. Hosts drive it with the command methods; every command
//! absorbs bad input (wrong phase, unknown id, missing resources) and
//! reports it through `tracing` only.
//!
//! ## Phases
//!
//! ```text
//! Preparation --start_battle--> Battle(SpellSelection)
//! Battle(SpellSelection) --end_turn--> Battle(Execution)   [round resolves]
//! Battle(Execution)      --end_turn--> Battle(SpellSelection) [next round]
//! any defeat --> Result (terminal)
//! ```
//!
//! ## Example
//!
//! ```
//! use grimoire_duel::battle::Battle;
//! use grimoire_duel::content::{GrimoireId, MageId, SpellId};
//! use grimoire_duel::core::{BattleConfig, PlayerId};
//!
//! let mut battle = Battle::starter(BattleConfig::default().with_seed(7));
//! let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
//!
//! battle.start_game();
//! battle.select_mage(p0, MageId::new("inaui_001"));
//! battle.select_grimoires(p0, [GrimoireId::new("water_001")]);
//! battle.select_mage(p1, MageId::new("idlad_001"));
//! battle.select_grimoires(p1, [GrimoireId::new("fire_001")]);
//! battle.start_battle();
//!
//! battle.select_spell(p0, Some(SpellId::new("akua_001")), false);
//! let summary = battle.end_turn().unwrap();
//! assert_eq!(summary.executed.len(), 1);
//! ```

use crate::combat::{CombatResolver, ResolverContext, RoundSummary};
use crate::content::{ContentTables, GrimoireId, MageId, SpellId};
use crate::core::{
    BattleConfig, BattlePhase, GamePhase, GameRng, GameState, Player, PlayerId, RandomSource,
};
use crate::error::SnapshotError;
use crate::events::{ChargeStatus, CombatLogEntry, EventSink, GameEvent, SpellCast};

/// A single battle.
///
/// Generic over the random source so tests can script critical rolls.
pub struct Battle<R: RandomSource = GameRng> {
    state: GameState,
    rng: R,
    config: BattleConfig,
}

impl Battle<GameRng> {
    /// Create a battle seeded from `config.seed`.
    ///
    /// Panics if `players.len()` differs from `config.player_count`.
    #[must_use]
    pub fn new(config: BattleConfig, content: ContentTables, players: Vec<Player>) -> Self {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, content, players, rng)
    }

    /// A battle on the starter content, every seat able to field every mage.
    #[must_use]
    pub fn starter(config: BattleConfig) -> Self {
        let roster = ContentTables::starter_roster();
        let players = PlayerId::all(config.player_count)
            .map(|id| Player::new(id, format!("Player {}", id.0 + 1)).with_roster(roster.clone()))
            .collect();
        Self::new(config, ContentTables::starter(), players)
    }

    /// An independent stream for opponent policies, derived from the
    /// battle seed. Does not advance the critical-roll stream.
    pub fn policy_rng(&mut self) -> GameRng {
        self.rng.fork()
    }
}

impl<R: RandomSource> Battle<R> {
    /// Create a battle with an explicit random source.
    ///
    /// Panics if `players.len()` differs from `config.player_count`.
    pub fn with_rng(config: BattleConfig, content: ContentTables, players: Vec<Player>, rng: R) -> Self {
        assert_eq!(
            players.len(),
            config.player_count,
            "Player list must match configured player count"
        );
        Self {
            state: GameState::new(content, players),
            rng,
            config,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// The random source, e.g. to inspect a scripted sequence.
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    #[must_use]
    pub fn battle_phase(&self) -> BattlePhase {
        self.state.battle_phase
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    /// Remove and return the logged entries.
    pub fn drain_log(&mut self) -> Vec<CombatLogEntry> {
        self.state.log.drain()
    }

    /// Drain the logged events into a sink.
    pub fn drain_into(&mut self, sink: &mut impl EventSink) {
        self.state.log.drain_into(sink);
    }

    /// Encode the current state.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        self.state.snapshot()
    }

    /// Replace the current state with a decoded snapshot.
    ///
    /// The random source is left as is.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        self.state = GameState::restore(bytes)?;
        Ok(())
    }

    // === Commands ===

    /// Initialize the phase machine. Only valid during preparation.
    pub fn start_game(&mut self) -> bool {
        if self.state.phase != GamePhase::Preparation {
            tracing::warn!(phase = %self.state.phase, "start_game ignored outside preparation");
            return false;
        }
        self.state.emit(GameEvent::GameInitialized);
        self.set_phase(GamePhase::Preparation);
        true
    }

    /// Field a mage from the player's roster.
    pub fn select_mage(&mut self, player: PlayerId, mage: MageId) -> bool {
        if self.state.phase != GamePhase::Preparation {
            tracing::warn!(%player, %mage, "select_mage ignored outside preparation");
            return false;
        }
        let Some(seat) = self.state.players.get_mut(player) else {
            tracing::warn!(%player, "select_mage for unknown player");
            return false;
        };
        if !seat.can_field(&mage) || !self.state.content.contains_mage(&mage) {
            tracing::warn!(%player, %mage, "mage is not available to this player");
            return false;
        }

        seat.selected_mage = Some(mage.clone());
        self.state.emit(GameEvent::MageSelected { player, mage });
        true
    }

    /// Choose the grimoires brought into battle. Unknown ids are dropped.
    pub fn select_grimoires(
        &mut self,
        player: PlayerId,
        grimoires: impl IntoIterator<Item = GrimoireId>,
    ) -> bool {
        if self.state.phase != GamePhase::Preparation {
            tracing::warn!(%player, "select_grimoires ignored outside preparation");
            return false;
        }
        if !self.state.players.contains(player) {
            tracing::warn!(%player, "select_grimoires for unknown player");
            return false;
        }

        let mut kept: Vec<GrimoireId> = Vec::new();
        for id in grimoires {
            if !self.state.content.contains_grimoire(&id) {
                tracing::warn!(%player, grimoire = %id, "unknown grimoire dropped");
            } else if !kept.contains(&id) {
                kept.push(id);
            }
        }

        self.state.players[player].selected_grimoires = kept.clone();
        self.state.emit(GameEvent::GrimoireSelected {
            player,
            grimoires: kept,
        });
        true
    }

    /// Choose this round's spell. `None` passes.
    ///
    /// `innate` asks for the discounted innate cast. It only takes effect if
    /// the spell is the fielded mage's innate spell.
    pub fn select_spell(&mut self, player: PlayerId, spell: Option<SpellId>, innate: bool) -> bool {
        if !self.in_spell_selection() {
            tracing::warn!(%player, "select_spell ignored outside spell selection");
            return false;
        }
        if let Some(id) = &spell {
            if !self.state.content.contains_spell(id) {
                tracing::warn!(%player, spell = %id, "unknown spell");
                return false;
            }
        }
        let Some(seat) = self.state.players.get_mut(player) else {
            tracing::warn!(%player, "select_spell for unknown player");
            return false;
        };
        if seat.committed {
            tracing::warn!(%player, "select_spell ignored after a confirmed charge");
            return false;
        }

        seat.innate_selected = innate && spell.is_some();
        seat.selected_spell = spell.clone();
        self.state.emit(GameEvent::SpellSelected { player, spell });
        true
    }

    /// Confirm a charging spell: pay for it now and start the countdown.
    ///
    /// Returns false if nothing was started. Instant spells need no
    /// confirmation and resolve at `end_turn`.
    pub fn confirm_spell(&mut self, player: PlayerId) -> bool {
        if !self.in_spell_selection() {
            return false;
        }
        let Some((spell_id, innate)) = self
            .state
            .player(player)
            .filter(|p| !p.committed)
            .and_then(|p| p.selected_spell.clone().map(|s| (s, p.innate_selected)))
        else {
            return false;
        };
        let is_charging = self
            .state
            .content
            .spell(&spell_id)
            .is_ok_and(|s| s.is_charging());
        if !is_charging {
            return false;
        }

        match CombatResolver::start_charge(&mut self.state, player, &spell_id, innate, &self.config.rules) {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!(%player, spell = %spell_id, %reason, "charge not started");
                false
            }
        }
    }

    /// Leave preparation and begin round 1.
    pub fn start_battle(&mut self) -> bool {
        if self.state.phase != GamePhase::Preparation {
            tracing::warn!(phase = %self.state.phase, "start_battle ignored outside preparation");
            return false;
        }

        self.state.snapshot_spell_uses();
        if self.config.apply_personality {
            self.apply_personalities();
        }

        self.set_phase(GamePhase::Battle);
        self.set_battle_phase(BattlePhase::SpellSelection);
        self.state.compute_turn_order();
        self.state.round = 1;
        self.state.log.set_round(1);
        self.emit_turn_events(true);

        tracing::debug!(turn_order = ?self.state.turn_order, "battle started");
        true
    }

    /// Advance the battle.
    ///
    /// From spell selection this resolves the round and returns its summary.
    /// From execution it ends the round: charging spells tick, magia
    /// regenerates and the next round's selection opens.
    pub fn end_turn(&mut self) -> Option<RoundSummary> {
        if self.state.phase != GamePhase::Battle {
            tracing::warn!(phase = %self.state.phase, "end_turn ignored outside battle");
            return None;
        }

        match self.state.battle_phase {
            BattlePhase::SpellSelection => Some(self.execute_round()),
            BattlePhase::Execution => {
                self.finish_round();
                None
            }
        }
    }

    // === Internals ===

    fn in_spell_selection(&self) -> bool {
        self.state.phase == GamePhase::Battle
            && self.state.battle_phase == BattlePhase::SpellSelection
    }

    fn set_phase(&mut self, next: GamePhase) {
        let previous = self.state.phase;
        self.state.phase = next;
        self.state.emit(GameEvent::PhaseChanged {
            previous,
            current: next,
        });
    }

    fn set_battle_phase(&mut self, next: BattlePhase) {
        let previous = self.state.battle_phase;
        self.state.battle_phase = next;
        self.state.emit(GameEvent::BattlePhaseChanged {
            previous,
            current: next,
        });
    }

    fn emit_turn_events(&mut self, started: bool) {
        let round = self.state.round;
        for player in self.state.turn_order.clone() {
            let event = if started {
                GameEvent::TurnStarted { round, player }
            } else {
                GameEvent::TurnEnded { round, player }
            };
            self.state.emit(event);
        }
    }

    /// Fielded mage ids, each once, in seat order.
    fn fielded_mages(&self) -> Vec<MageId> {
        let mut mages: Vec<MageId> = Vec::new();
        for player in self.state.players.values() {
            if let Some(id) = &player.selected_mage {
                if !mages.contains(id) {
                    mages.push(id.clone());
                }
            }
        }
        mages
    }

    fn apply_personalities(&mut self) {
        for id in self.fielded_mages() {
            if let Ok(mage) = self.state.content.mage_mut(&id) {
                mage.apply_personality();
                tracing::debug!(mage = %id, personality = ?mage.personality, "personality applied");
            }
        }
    }

    fn execute_round(&mut self) -> RoundSummary {
        self.set_battle_phase(BattlePhase::Execution);

        let mut ctx = ResolverContext::new(&self.config.rules, &mut self.rng);
        let summary = CombatResolver::resolve_round(&mut self.state, &mut ctx);

        if let Some(winner) = summary.winner {
            self.set_phase(GamePhase::Result);
            tracing::debug!(%winner, round = self.state.round, "battle over");
        }
        summary
    }

    fn finish_round(&mut self) {
        self.emit_turn_events(false);

        self.state.round += 1;
        self.state.log.set_round(self.state.round);

        for progress in self.state.charging.advance() {
            let charged = progress.spell;
            let target = self
                .state
                .opponent_of(charged.player)
                .and_then(|p| self.state.selected_mage_id(p))
                .cloned();
            let effects = self
                .state
                .content
                .spell(&charged.spell)
                .map(|s| s.effects.clone())
                .unwrap_or_default();

            self.state.emit(GameEvent::SpellCast(
                SpellCast::new(charged.mage, target, charged.spell, &effects).with_charge(progress.status),
            ));
            if progress.status == ChargeStatus::ChargeComplete {
                tracing::debug!(player = %charged.player, "charged spell ready");
            }
        }

        for id in self.fielded_mages() {
            let Ok(mage) = self.state.content.mage_mut(&id) else {
                continue;
            };
            let amount = mage.regenerate_magia();
            let new_magia = mage.magia;
            if amount > 0 {
                self.state.emit(GameEvent::MagiaRegenerated {
                    mage: id,
                    amount,
                    new_magia,
                });
            }
        }

        self.state.release_commitments();
        self.set_battle_phase(BattlePhase::SpellSelection);
        self.emit_turn_events(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRolls;
    use crate::events::EventKind;

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    fn prepared() -> Battle<ScriptedRolls> {
        let roster = ContentTables::starter_roster();
        let players = vec![
            Player::new(p(0), "Ana").with_roster(roster.clone()),
            Player::new(p(1), "Bo").with_roster(roster),
        ];
        let mut battle = Battle::with_rng(
            BattleConfig::default(),
            ContentTables::starter(),
            players,
            ScriptedRolls::never_critical(),
        );
        battle.start_game();
        battle.select_mage(p(0), MageId::new("inaui_001"));
        battle.select_grimoires(p(0), [GrimoireId::new("water_001")]);
        battle.select_mage(p(1), MageId::new("narnrokhar_001"));
        battle.select_grimoires(p(1), [GrimoireId::new("earth_001")]);
        battle
    }

    #[test]
    fn test_start_game_emits_initialized() {
        let battle = prepared();
        let opening: Vec<_> = battle.state().log.entries().take(2).map(|e| e.event.clone()).collect();
        assert_eq!(
            opening,
            vec![
                GameEvent::GameInitialized,
                GameEvent::PhaseChanged {
                    previous: GamePhase::Preparation,
                    current: GamePhase::Preparation,
                },
            ]
        );
    }

    #[test]
    fn test_select_mage_requires_roster() {
        let mut battle = prepared();
        battle.state.players[p(0)].roster.clear();

        assert!(!battle.select_mage(p(0), MageId::new("surha_001")));
        assert!(!battle.select_mage(p(1), MageId::new("ghost")));
        assert!(!battle.select_mage(p(5), MageId::new("surha_001")));
        assert_eq!(
            battle.state().selected_mage_id(p(0)),
            Some(&MageId::new("inaui_001"))
        );
    }

    #[test]
    fn test_select_grimoires_drops_unknown() {
        let mut battle = prepared();
        battle.select_grimoires(
            p(0),
            [
                GrimoireId::new("water_001"),
                GrimoireId::new("nope"),
                GrimoireId::new("water_001"),
            ],
        );
        assert_eq!(
            battle.state().players[p(0)].selected_grimoires,
            vec![GrimoireId::new("water_001")]
        );
    }

    #[test]
    fn test_start_battle_transitions() {
        let mut battle = prepared();
        battle.drain_log();

        assert!(battle.start_battle());

        assert_eq!(battle.phase(), GamePhase::Battle);
        assert_eq!(battle.battle_phase(), BattlePhase::SpellSelection);
        assert_eq!(battle.round(), 1);
        // inaui agility 20 before narnrokhar agility 5
        assert_eq!(battle.state().turn_order, vec![p(0), p(1)]);

        let kinds: Vec<_> = battle.drain_log().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::PhaseChanged,
                EventKind::BattlePhaseChanged,
                EventKind::TurnStarted,
                EventKind::TurnStarted,
            ]
        );
        assert!(!battle.start_battle());
    }

    #[test]
    fn test_commands_ignored_in_wrong_phase() {
        let mut battle = prepared();

        assert!(!battle.select_spell(p(0), Some(SpellId::new("akua_001")), false));
        assert!(battle.end_turn().is_none());

        battle.start_battle();
        assert!(!battle.select_mage(p(0), MageId::new("surha_001")));
        assert!(!battle.start_game());
    }

    #[test]
    fn test_round_cycle_and_regen() {
        let mut battle = prepared();
        battle.start_battle();

        battle.select_spell(p(0), Some(SpellId::new("akua_001")), true);
        let summary = battle.end_turn().unwrap();
        assert_eq!(summary.executed.len(), 1);
        assert_eq!(battle.battle_phase(), BattlePhase::Execution);

        // akua costs 10, innate half is 5; inaui regenerates 15 capped at 120
        let inaui = MageId::new("inaui_001");
        assert_eq!(battle.state().content.mage(&inaui).unwrap().magia, 115);

        battle.drain_log();
        assert!(battle.end_turn().is_none());

        assert_eq!(battle.round(), 2);
        assert_eq!(battle.battle_phase(), BattlePhase::SpellSelection);
        assert_eq!(battle.state().content.mage(&inaui).unwrap().magia, 120);

        let log = battle.drain_log();
        let regen: Vec<_> = log
            .iter()
            .filter(|e| e.kind() == EventKind::MagiaRegenerated)
            .collect();
        assert_eq!(regen.len(), 1);
        assert_eq!(log.iter().filter(|e| e.kind() == EventKind::TurnEnded).count(), 2);
        assert!(log.iter().all(|e| e.kind() != EventKind::TurnStarted || e.round == 2));
    }

    #[test]
    fn test_personality_applied_once_at_start() {
        let roster = ContentTables::starter_roster();
        let players = vec![
            Player::new(p(0), "Ana").with_roster(roster.clone()),
            Player::new(p(1), "Bo").with_roster(roster),
        ];
        let mut battle = Battle::new(
            BattleConfig::default().with_personality(),
            ContentTables::starter(),
            players,
        );
        battle.select_mage(p(0), MageId::new("idlad_001"));
        battle.select_mage(p(1), MageId::new("idlad_001"));
        battle.start_battle();

        // aggressive: 50 * 1.1 = 55, applied once for the shared mage
        let idlad = battle.state().content.mage(&MageId::new("idlad_001")).unwrap();
        assert_eq!(idlad.attack_power, 55);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut battle = prepared();
        battle.start_battle();
        let bytes = battle.snapshot().unwrap();

        battle.select_spell(p(0), Some(SpellId::new("akua_001")), false);
        battle.end_turn();
        assert_eq!(battle.battle_phase(), BattlePhase::Execution);

        battle.restore(&bytes).unwrap();
        assert_eq!(battle.battle_phase(), BattlePhase::SpellSelection);
        assert_eq!(battle.round(), 1);
    }
}
