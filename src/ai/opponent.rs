//! Opponent policies.
//!
//! A policy makes the same choices a human seat would: a mage, the
//! grimoires it brings, and each round a spell or a pass. Policies only
//! read state; the free functions here feed their choices into a
//! [`Battle`] through the ordinary commands.

use crate::battle::Battle;
use crate::combat::math;
use crate::content::{GrimoireId, MageId, SpellId};
use crate::core::{CombatRules, GameState, PlayerId, RandomSource};

/// A spell a player can cast this round, and what it would cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpellChoice {
    pub spell: SpellId,
    pub innate: bool,
    pub cost: i64,
}

/// Every spell `player` could cast right now.
///
/// Grimoire spells with uses left and affordable magia come first, in
/// grimoire order, followed by the innate spell at its discounted cost.
/// Empty if the player has no fielded mage.
pub fn castable_spells(state: &GameState, player: PlayerId, rules: &CombatRules) -> Vec<SpellChoice> {
    let (Ok(caster), Some(seat)) = (state.selected_mage(player), state.player(player)) else {
        return Vec::new();
    };

    let mut choices: Vec<SpellChoice> = state
        .content
        .spells_in(&seat.selected_grimoires)
        .filter(|s| state.uses_remaining(player, &s.id).available())
        .filter(|s| s.magia_cost <= caster.magia)
        .map(|s| SpellChoice {
            spell: s.id.clone(),
            innate: false,
            cost: s.magia_cost,
        })
        .collect();

    if let Ok(innate) = state.content.spell(&caster.innate_spell) {
        let cost = math::cast_cost(caster, innate, true, rules);
        if cost <= caster.magia {
            choices.push(SpellChoice {
                spell: innate.id.clone(),
                innate: true,
                cost,
            });
        }
    }
    choices
}

/// Decision-making for a non-human seat.
pub trait OpponentPolicy {
    /// Pick a mage to field. `None` if nothing is available.
    fn choose_mage(&self, state: &GameState, player: PlayerId, rng: &mut dyn RandomSource) -> Option<MageId>;

    /// Pick grimoires for the chosen mage. Defaults to the ones it owns.
    fn choose_grimoires(&self, state: &GameState, _player: PlayerId, mage: &MageId) -> Vec<GrimoireId> {
        state
            .content
            .mage(mage)
            .map(|m| m.grimoires.clone())
            .unwrap_or_default()
    }

    /// Pick this round's spell. `None` passes.
    fn choose_spell(
        &self,
        state: &GameState,
        player: PlayerId,
        rules: &CombatRules,
        rng: &mut dyn RandomSource,
    ) -> Option<SpellChoice>;
}

/// Uniform random opponent.
///
/// Picks uniformly among roster mages and castable spells, passing only
/// when nothing is castable.
#[derive(Clone, Debug, Default)]
pub struct RandomOpponent;

impl OpponentPolicy for RandomOpponent {
    fn choose_mage(&self, state: &GameState, player: PlayerId, rng: &mut dyn RandomSource) -> Option<MageId> {
        let roster: Vec<&MageId> = state
            .player(player)?
            .roster
            .iter()
            .filter(|id| state.content.contains_mage(id))
            .collect();
        if roster.is_empty() {
            return None;
        }
        let idx = rng.next_index(roster.len());
        Some(roster[idx].clone())
    }

    fn choose_spell(
        &self,
        state: &GameState,
        player: PlayerId,
        rules: &CombatRules,
        rng: &mut dyn RandomSource,
    ) -> Option<SpellChoice> {
        let mut choices = castable_spells(state, player, rules);
        if choices.is_empty() {
            return None;
        }
        let idx = rng.next_index(choices.len());
        Some(choices.swap_remove(idx))
    }
}

/// Let a policy pick a mage and grimoires for `player`.
///
/// Returns false if the policy found no mage or the battle rejected it.
pub fn prepare_seat<R: RandomSource>(
    battle: &mut Battle<R>,
    policy: &dyn OpponentPolicy,
    player: PlayerId,
    rng: &mut dyn RandomSource,
) -> bool {
    let Some(mage) = policy.choose_mage(battle.state(), player, rng) else {
        return false;
    };
    let grimoires = policy.choose_grimoires(battle.state(), player, &mage);
    battle.select_mage(player, mage) && battle.select_grimoires(player, grimoires)
}

/// Let a policy choose this round's spell for `player`, confirming it if
/// it charges.
pub fn select_for_round<R: RandomSource>(
    battle: &mut Battle<R>,
    policy: &dyn OpponentPolicy,
    player: PlayerId,
    rng: &mut dyn RandomSource,
) -> Option<SpellChoice> {
    let rules = battle.config().rules;
    let choice = policy.choose_spell(battle.state(), player, &rules, rng);

    match &choice {
        Some(c) => {
            battle.select_spell(player, Some(c.spell.clone()), c.innate);
            battle.confirm_spell(player);
        }
        None => {
            battle.select_spell(player, None, false);
        }
    }
    choice
}
