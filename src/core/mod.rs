//! Core engine types: players, phases, state, RNG, configuration.
//!
//! These are the building blocks every other module works against.
//! Hosts configure battles via `BattleConfig` rather than by touching state.

pub mod player;
pub mod phase;
pub mod rng;
pub mod config;
pub mod state;

pub use player::{Player, PlayerId, PlayerMap};
pub use phase::{BattlePhase, GamePhase};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRolls};
pub use config::{BattleConfig, CombatRules};
pub use state::{GameState, SpellUses};
