//! Combat events.
//!
//! Every observable thing the engine does is one [`GameEvent`] variant.
//! Presentation layers match on the variant; [`EventKind`] gives a
//! payload-free tag for counting and filtering.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::content::{EffectKind, GrimoireId, MageId, SpellEffect, SpellId};
use crate::core::{BattlePhase, GamePhase, PlayerId};

/// Normalized view of one declared spell effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSummary {
    pub kind: EffectKind,
    pub value: i64,
    pub name: Option<String>,
}

impl From<&SpellEffect> for EffectSummary {
    fn from(effect: &SpellEffect) -> Self {
        Self {
            kind: effect.kind,
            value: effect.value,
            name: effect.name.clone(),
        }
    }
}

/// Where a spell cast sits in the charging lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargeStatus {
    /// The spell was just confirmed and begins charging for `turns` rounds.
    InitialCharge { turns: u32 },
    /// Still charging with `turns_remaining` rounds to go.
    StillCharging { turns_remaining: u32 },
    /// Charging finished; the spell fires at the next execution.
    ChargeComplete,
    /// The charged spell is firing now.
    Charged,
}

impl ChargeStatus {
    /// True while the spell has not fired yet.
    #[must_use]
    pub const fn is_charging(self) -> bool {
        !matches!(self, Self::Charged)
    }

    /// True for the cast that actually applies effects.
    #[must_use]
    pub const fn is_charged(self) -> bool {
        matches!(self, Self::Charged)
    }

    /// Rounds left before the spell fires, if known.
    #[must_use]
    pub const fn charging_turns(self) -> Option<u32> {
        match self {
            Self::InitialCharge { turns } => Some(turns),
            Self::StillCharging { turns_remaining } => Some(turns_remaining),
            Self::ChargeComplete | Self::Charged => None,
        }
    }
}

/// Payload of [`GameEvent::SpellCast`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCast {
    pub caster: MageId,
    /// Opponent mage at the time of the event.
    pub target: Option<MageId>,
    pub spell: SpellId,
    pub effects: SmallVec<[EffectSummary; 4]>,
    /// `None` for an ordinary same-round cast.
    pub charge: Option<ChargeStatus>,
}

impl SpellCast {
    /// Build a cast summary from a spell's declared effects.
    pub fn new<'a>(
        caster: MageId,
        target: Option<MageId>,
        spell: SpellId,
        effects: impl IntoIterator<Item = &'a SpellEffect>,
    ) -> Self {
        Self {
            caster,
            target,
            spell,
            effects: effects.into_iter().map(EffectSummary::from).collect(),
            charge: None,
        }
    }

    /// Tag with a charging status (builder pattern).
    #[must_use]
    pub fn with_charge(mut self, status: ChargeStatus) -> Self {
        self.charge = Some(status);
        self
    }

    #[must_use]
    pub fn is_initial_charge(&self) -> bool {
        matches!(self.charge, Some(ChargeStatus::InitialCharge { .. }))
    }

    #[must_use]
    pub fn is_charged(&self) -> bool {
        self.charge.is_some_and(ChargeStatus::is_charged)
    }
}

/// Everything the engine reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameInitialized,
    PhaseChanged {
        previous: GamePhase,
        current: GamePhase,
    },
    BattlePhaseChanged {
        previous: BattlePhase,
        current: BattlePhase,
    },
    TurnStarted {
        round: u32,
        player: PlayerId,
    },
    TurnEnded {
        round: u32,
        player: PlayerId,
    },
    MageSelected {
        player: PlayerId,
        mage: MageId,
    },
    GrimoireSelected {
        player: PlayerId,
        grimoires: Vec<GrimoireId>,
    },
    /// `spell` is `None` when the player passes.
    SpellSelected {
        player: PlayerId,
        spell: Option<SpellId>,
    },
    SpellCast(SpellCast),
    DamageDealt {
        target: MageId,
        amount: i64,
        new_health: i64,
        source: MageId,
        spell: SpellId,
        is_charged: bool,
    },
    HealingReceived {
        target: MageId,
        amount: i64,
        new_health: i64,
        source: MageId,
        spell: SpellId,
    },
    MagiaConsumed {
        mage: MageId,
        amount: i64,
        new_magia: i64,
    },
    MagiaRegenerated {
        mage: MageId,
        amount: i64,
        new_magia: i64,
    },
    StatusApplied {
        target: MageId,
        status_type: String,
        duration: u32,
        source: MageId,
    },
    MageDefeated {
        mage: MageId,
        player: PlayerId,
    },
    GameOver {
        winner: PlayerId,
        reason: String,
    },
}

/// Payload-free tag of a [`GameEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    GameInitialized,
    PhaseChanged,
    BattlePhaseChanged,
    TurnStarted,
    TurnEnded,
    MageSelected,
    GrimoireSelected,
    SpellSelected,
    SpellCast,
    DamageDealt,
    HealingReceived,
    MagiaConsumed,
    MagiaRegenerated,
    StatusApplied,
    MageDefeated,
    GameOver,
}

impl GameEvent {
    /// The variant tag of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::GameInitialized => EventKind::GameInitialized,
            Self::PhaseChanged { .. } => EventKind::PhaseChanged,
            Self::BattlePhaseChanged { .. } => EventKind::BattlePhaseChanged,
            Self::TurnStarted { .. } => EventKind::TurnStarted,
            Self::TurnEnded { .. } => EventKind::TurnEnded,
            Self::MageSelected { .. } => EventKind::MageSelected,
            Self::GrimoireSelected { .. } => EventKind::GrimoireSelected,
            Self::SpellSelected { .. } => EventKind::SpellSelected,
            Self::SpellCast(_) => EventKind::SpellCast,
            Self::DamageDealt { .. } => EventKind::DamageDealt,
            Self::HealingReceived { .. } => EventKind::HealingReceived,
            Self::MagiaConsumed { .. } => EventKind::MagiaConsumed,
            Self::MagiaRegenerated { .. } => EventKind::MagiaRegenerated,
            Self::StatusApplied { .. } => EventKind::StatusApplied,
            Self::MageDefeated { .. } => EventKind::MageDefeated,
            Self::GameOver { .. } => EventKind::GameOver,
        }
    }

    /// The spell-cast payload, if this is a cast.
    #[must_use]
    pub fn as_spell_cast(&self) -> Option<&SpellCast> {
        match self {
            Self::SpellCast(cast) => Some(cast),
            _ => None,
        }
    }
}
