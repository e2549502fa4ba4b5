//! Combat events and the log that records them.
//!
//! ## Key Types
//!
//! - `GameEvent`: One variant per observable engine action
//! - `EventKind`: Payload-free tag for filtering
//! - `SpellCast`, `ChargeStatus`: Cast payload and charging lifecycle
//! - `CombatLog`: Append-only, drainable record with increasing entry ids
//! - `EventSink`: Ordered destination for events

pub mod event;
pub mod log;

pub use event::{ChargeStatus, EffectSummary, EventKind, GameEvent, SpellCast};
pub use log::{CombatLog, CombatLogEntry, EventSink};
