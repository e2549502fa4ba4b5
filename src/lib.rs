//! # grimoire-duel
//!
//! A turn-based mage duel battle engine.
//!
//! Players field a mage, bring grimoires of spells, then each round pick a
//! spell or pass. The engine orders and resolves the round, accounts for
//! magia and spell uses, runs multi-round charging spells and records
//! everything in a combat log for presentation layers to replay.
//!
//! ## Design Principles
//!
//! 1. **One Mutable Root**: All state lives in `GameState`, owned by a
//!    single `Battle` controller. No globals.
//!
//! 2. **Typed Events**: Every observable effect is a `GameEvent` variant
//!    appended to an ordered log.
//!
//! 3. **Injected Randomness**: Critical hits draw from a `RandomSource`,
//!    one roll per damage computation, so battles replay exactly.
//!
//! 4. **Absorb, Don't Raise**: Bad commands and unaffordable actions are
//!    skipped, never propagated to the caller.
//!
//! ## Modules
//!
//! - `core`: Players, phases, state, RNG, configuration
//! - `content`: Mages, spells, grimoires and their lookup tables
//! - `combat`: Damage math, charging spells, round resolution
//! - `events`: Event types and the combat log
//! - `battle`: The command-driven battle controller
//! - `ai`: Opponent policies
//! - `error`: Error types

pub mod core;
pub mod content;
pub mod combat;
pub mod events;
pub mod battle;
pub mod ai;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Player, PlayerId, PlayerMap,
    GamePhase, BattlePhase,
    GameRng, GameRngState, RandomSource, ScriptedRolls,
    BattleConfig, CombatRules,
    GameState, SpellUses,
};

pub use crate::content::{
    Affinity, Personality, Mage, MageId,
    Spell, SpellId, SpellType, SpellEffect, EffectKind, EffectTarget,
    Grimoire, GrimoireId, ContentTables,
};

pub use crate::combat::{
    ChargingSpell, ChargingTracker,
    CombatResolver, ResolverContext, RoundSummary, SkippedAction,
};

pub use crate::events::{
    GameEvent, EventKind, SpellCast, ChargeStatus,
    CombatLog, CombatLogEntry, EventSink,
};

pub use crate::battle::Battle;

pub use crate::ai::{OpponentPolicy, RandomOpponent};

pub use crate::error::{ActionError, ContentError, ErrorCategory, SnapshotError};
