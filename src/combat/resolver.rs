//! Round resolution - executing one round of spells on game state.
//!
//! The `CombatResolver` turns the players' selections into an ordered
//! sequence of effect applications and log entries:
//!
//! 1. Fire every charged spell in the ready queue, in queue order.
//! 2. Collect one action per player with a selected spell.
//! 3. Stable sort by ascending casting time, then descending caster agility.
//! 4. Execute each action. Charging spells are paid for and queued instead.
//! 5. Stop as soon as a mage is defeated.
//! 6. Clear every selection.
//!
//! A failing action never aborts the round. It is skipped with no state
//! change and reported in [`RoundSummary::skipped`].

use crate::content::{EffectKind, MageId, Spell, SpellId};
use crate::core::{CombatRules, GameState, PlayerId, RandomSource};
use crate::error::ActionError;
use crate::events::{ChargeStatus, GameEvent, SpellCast};

use super::charging::ChargingSpell;
use super::math;

/// What the resolver needs beyond the state itself.
pub struct ResolverContext<'a> {
    pub rules: &'a CombatRules,
    /// Source for critical-hit rolls.
    pub rng: &'a mut dyn RandomSource,
}

impl<'a> ResolverContext<'a> {
    pub fn new(rules: &'a CombatRules, rng: &'a mut dyn RandomSource) -> Self {
        Self { rules, rng }
    }
}

/// A spell that resolved or began charging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastRecord {
    pub player: PlayerId,
    pub spell: SpellId,
    /// True when fired from the ready queue.
    pub charged: bool,
}

/// An action that produced nothing, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedAction {
    pub player: PlayerId,
    pub spell: SpellId,
    pub reason: ActionError,
}

/// Outcome of one [`CombatResolver::resolve_round`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub executed: Vec<CastRecord>,
    pub charging_started: Vec<CastRecord>,
    pub skipped: Vec<SkippedAction>,
    pub winner: Option<PlayerId>,
}

impl RoundSummary {
    /// True if nothing at all happened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executed.is_empty() && self.charging_started.is_empty() && self.skipped.is_empty()
    }
}

#[derive(Clone, Debug)]
struct PendingAction {
    player: PlayerId,
    spell: SpellId,
    innate: bool,
    casting_time: u32,
    agility: i64,
}

enum Executed {
    Cast,
    ChargingStarted,
}

/// Validated cost of a cast, computed before anything is mutated.
struct CastPlan {
    caster: MageId,
    cost: i64,
    innate: bool,
}

/// Resolves rounds on game state.
pub struct CombatResolver;

impl CombatResolver {
    /// Resolve the current round.
    ///
    /// Does nothing beyond clearing selections once a winner exists.
    pub fn resolve_round(state: &mut GameState, ctx: &mut ResolverContext<'_>) -> RoundSummary {
        let mut summary = RoundSummary::default();

        if state.winner.is_none() {
            Self::fire_ready(state, ctx, &mut summary);
        }

        if state.winner.is_none() {
            let mut actions = Self::collect_actions(state, &mut summary);
            actions.sort_by(|a, b| {
                a.casting_time
                    .cmp(&b.casting_time)
                    .then(b.agility.cmp(&a.agility))
            });

            for action in actions {
                let record = CastRecord {
                    player: action.player,
                    spell: action.spell.clone(),
                    charged: false,
                };
                match Self::execute_action(state, &action, ctx) {
                    Ok(Executed::Cast) => summary.executed.push(record),
                    Ok(Executed::ChargingStarted) => summary.charging_started.push(record),
                    Err(reason) => Self::skip(&mut summary, action.player, action.spell, reason),
                }
                if state.winner.is_some() {
                    break;
                }
            }
        }

        summary.winner = state.winner;
        state.clear_spell_selections();
        summary
    }

    /// Pay for a charging spell and start its countdown.
    ///
    /// Consumes magia and (unless innate) one use, clears the player's
    /// selection and logs the initial charge.
    pub fn start_charge(
        state: &mut GameState,
        player: PlayerId,
        spell_id: &SpellId,
        innate: bool,
        rules: &CombatRules,
    ) -> Result<(), ActionError> {
        if state.is_over() {
            return Err(ActionError::BattleOver);
        }
        let spell = state.content.spell(spell_id)?.clone();
        let plan = Self::plan_cast(state, player, &spell, innate, rules)?;
        let target = state
            .opponent_of(player)
            .and_then(|p| state.selected_mage_id(p))
            .cloned();

        Self::pay(state, player, &spell, &plan)?;

        state.charging.begin(ChargingSpell {
            player,
            mage: plan.caster.clone(),
            spell: spell.id.clone(),
            remaining_turns: spell.casting_time,
            is_innate: plan.innate,
        });
        if let Some(p) = state.player_mut(player) {
            p.commit();
        }

        state.emit(GameEvent::SpellCast(
            SpellCast::new(plan.caster, target, spell.id.clone(), &spell.effects).with_charge(
                ChargeStatus::InitialCharge {
                    turns: spell.casting_time,
                },
            ),
        ));
        tracing::debug!(%player, spell = %spell.id, turns = spell.casting_time, "spell begins charging");
        Ok(())
    }

    fn skip(summary: &mut RoundSummary, player: PlayerId, spell: SpellId, reason: ActionError) {
        tracing::warn!(%player, %spell, %reason, "action skipped");
        summary.skipped.push(SkippedAction {
            player,
            spell,
            reason,
        });
    }

    fn fire_ready(state: &mut GameState, ctx: &mut ResolverContext<'_>, summary: &mut RoundSummary) {
        for charged in state.charging.take_ready() {
            match Self::fire_charged(state, &charged, ctx) {
                Ok(()) => summary.executed.push(CastRecord {
                    player: charged.player,
                    spell: charged.spell,
                    charged: true,
                }),
                Err(reason) => Self::skip(summary, charged.player, charged.spell, reason),
            }
            if state.winner.is_some() {
                break;
            }
        }
    }

    fn collect_actions(state: &GameState, summary: &mut RoundSummary) -> Vec<PendingAction> {
        let mut actions = Vec::new();
        for (player, seat) in state.players.iter() {
            if seat.committed {
                continue;
            }
            let Some(spell) = seat.selected_spell.clone() else {
                continue;
            };
            match Self::pending_action(state, player, &spell, seat.innate_selected) {
                Ok(action) => actions.push(action),
                Err(reason) => Self::skip(summary, player, spell, reason),
            }
        }
        actions
    }

    fn pending_action(
        state: &GameState,
        player: PlayerId,
        spell_id: &SpellId,
        innate: bool,
    ) -> Result<PendingAction, ActionError> {
        let caster = state.selected_mage(player)?;
        let spell = state.content.spell(spell_id)?;
        Ok(PendingAction {
            player,
            spell: spell_id.clone(),
            innate,
            casting_time: spell.casting_time,
            agility: caster.agility,
        })
    }

    fn execute_action(
        state: &mut GameState,
        action: &PendingAction,
        ctx: &mut ResolverContext<'_>,
    ) -> Result<Executed, ActionError> {
        let spell = state.content.spell(&action.spell)?.clone();
        if spell.is_charging() {
            Self::start_charge(state, action.player, &spell.id, action.innate, ctx.rules)?;
            return Ok(Executed::ChargingStarted);
        }
        Self::cast_now(state, action.player, &spell, action.innate, ctx)?;
        Ok(Executed::Cast)
    }

    /// Check uses and magia without mutating anything.
    fn plan_cast(
        state: &GameState,
        player: PlayerId,
        spell: &Spell,
        innate: bool,
        rules: &CombatRules,
    ) -> Result<CastPlan, ActionError> {
        let caster = state.selected_mage(player)?;
        let innate = math::is_innate_cast(caster, spell, innate);
        if !innate {
            state.check_uses(player, &spell.id)?;
        }

        let cost = math::cast_cost(caster, spell, innate, rules);
        if caster.magia < cost {
            return Err(ActionError::InsufficientMagia {
                required: cost,
                available: caster.magia,
            });
        }

        Ok(CastPlan {
            caster: caster.id.clone(),
            cost,
            innate,
        })
    }

    fn pay(
        state: &mut GameState,
        player: PlayerId,
        spell: &Spell,
        plan: &CastPlan,
    ) -> Result<(), ActionError> {
        let new_magia = state.content.mage_mut(&plan.caster)?.spend_magia(plan.cost)?;
        if !plan.innate {
            state.consume_use(player, &spell.id);
        }
        state.emit(GameEvent::MagiaConsumed {
            mage: plan.caster.clone(),
            amount: plan.cost,
            new_magia,
        });
        Ok(())
    }

    /// The opponent of `player` and the mage they field, verified to exist.
    fn resolve_target(state: &GameState, player: PlayerId) -> Result<(PlayerId, MageId), ActionError> {
        let opponent = state
            .opponent_of(player)
            .ok_or(ActionError::NoOpponent(player))?;
        let target = state.selected_mage(opponent)?;
        Ok((opponent, target.id.clone()))
    }

    fn cast_now(
        state: &mut GameState,
        player: PlayerId,
        spell: &Spell,
        innate: bool,
        ctx: &mut ResolverContext<'_>,
    ) -> Result<(), ActionError> {
        let plan = Self::plan_cast(state, player, spell, innate, ctx.rules)?;
        let (opponent, target) = Self::resolve_target(state, player)?;

        Self::pay(state, player, spell, &plan)?;
        state.emit(GameEvent::SpellCast(SpellCast::new(
            plan.caster.clone(),
            Some(target.clone()),
            spell.id.clone(),
            &spell.effects,
        )));

        Self::apply_effects(state, &plan.caster, &target, spell, false, ctx)?;
        Self::check_defeat(state, player, opponent);
        Ok(())
    }

    fn fire_charged(
        state: &mut GameState,
        charged: &ChargingSpell,
        ctx: &mut ResolverContext<'_>,
    ) -> Result<(), ActionError> {
        let spell = state.content.spell(&charged.spell)?.clone();
        state.content.mage(&charged.mage)?;
        let (opponent, target) = Self::resolve_target(state, charged.player)?;

        state.emit(GameEvent::SpellCast(
            SpellCast::new(
                charged.mage.clone(),
                Some(target.clone()),
                spell.id.clone(),
                &spell.effects,
            )
            .with_charge(ChargeStatus::Charged),
        ));

        Self::apply_effects(state, &charged.mage, &target, &spell, true, ctx)?;
        Self::check_defeat(state, charged.player, opponent);
        Ok(())
    }

    fn apply_effects(
        state: &mut GameState,
        caster: &MageId,
        target: &MageId,
        spell: &Spell,
        is_charged: bool,
        ctx: &mut ResolverContext<'_>,
    ) -> Result<(), ActionError> {
        for effect in &spell.effects {
            match effect.kind {
                EffectKind::Damage => {
                    Self::apply_damage(state, caster, target, spell, is_charged, ctx)?;
                }
                EffectKind::Heal => Self::apply_heal(state, caster, spell)?,
                EffectKind::Status => {
                    if spell.status_carries_damage() {
                        Self::apply_damage(state, caster, target, spell, is_charged, ctx)?;
                    }
                    state.emit(GameEvent::StatusApplied {
                        target: target.clone(),
                        status_type: effect.name.clone().unwrap_or_else(|| "unknown".to_string()),
                        duration: effect.duration.unwrap_or(0),
                        source: caster.clone(),
                    });
                }
                EffectKind::Buff | EffectKind::Debuff => {
                    tracing::debug!(kind = %effect.kind, spell = %spell.id, "effect has no state change");
                }
            }
        }

        if spell.uses_default_damage() {
            Self::apply_damage(state, caster, target, spell, is_charged, ctx)?;
        }
        Ok(())
    }

    fn apply_damage(
        state: &mut GameState,
        caster: &MageId,
        target: &MageId,
        spell: &Spell,
        is_charged: bool,
        ctx: &mut ResolverContext<'_>,
    ) -> Result<(), ActionError> {
        let roll = {
            let attacker = state.content.mage(caster)?;
            let defender = state.content.mage(target)?;
            math::compute_damage(attacker, defender, spell, is_charged, ctx.rules, &mut *ctx.rng)
        };
        let new_health = state.content.mage_mut(target)?.take_damage(roll.amount);

        tracing::debug!(
            %caster,
            %target,
            amount = roll.amount,
            critical = roll.critical,
            multiplier = roll.affinity_multiplier,
            "damage dealt"
        );
        state.emit(GameEvent::DamageDealt {
            target: target.clone(),
            amount: roll.amount,
            new_health,
            source: caster.clone(),
            spell: spell.id.clone(),
            is_charged,
        });
        Ok(())
    }

    fn apply_heal(state: &mut GameState, caster: &MageId, spell: &Spell) -> Result<(), ActionError> {
        let mage = state.content.mage_mut(caster)?;
        let amount = math::compute_heal(spell.base_power, mage.attack_power);
        let new_health = mage.heal(amount);

        state.emit(GameEvent::HealingReceived {
            target: caster.clone(),
            amount,
            new_health,
            source: caster.clone(),
            spell: spell.id.clone(),
        });
        Ok(())
    }

    /// Record a win for `attacker` if `defender`'s mage is down.
    fn check_defeat(state: &mut GameState, attacker: PlayerId, defender: PlayerId) -> bool {
        let Some(mage_id) = state.selected_mage_id(defender).cloned() else {
            return false;
        };
        let Ok(mage) = state.content.mage_mut(&mage_id) else {
            return false;
        };
        if !mage.is_defeated() {
            return false;
        }
        mage.health = 0;
        let reason = format!("{} was defeated", mage.name);

        state.emit(GameEvent::MageDefeated {
            mage: mage_id,
            player: defender,
        });
        state.emit(GameEvent::GameOver {
            winner: attacker,
            reason,
        });
        state.winner = Some(attacker);
        tracing::debug!(winner = %attacker, "battle decided");
        true
    }
}
