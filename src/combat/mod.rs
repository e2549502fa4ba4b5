//! Combat: formulas, charging spells and round resolution.
//!
//! ## Key Types
//!
//! - `math`: Pure damage, heal, affinity and cost functions
//! - `ChargingTracker`: Multi-round delayed casts and the ready queue
//! - `CombatResolver`: Orders and executes one round of actions
//! - `RoundSummary`: What executed, what started charging, what was skipped

pub mod charging;
pub mod math;
pub mod resolver;

pub use charging::{ChargeProgress, ChargingSpell, ChargingTracker};
pub use math::DamageRoll;
pub use resolver::{CastRecord, CombatResolver, ResolverContext, RoundSummary, SkippedAction};
