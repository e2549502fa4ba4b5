//! Static game content: mages, spells, grimoires and their lookup tables.
//!
//! ## Key Types
//!
//! - `Mage`: A combatant with stats, affinity, innate spell and grimoires
//! - `Spell`: Cost, power, casting time and declared effects
//! - `Grimoire`: An ordered collection of spells
//! - `ContentTables`: Id lookup for all of the above
//!
//! Content is read-only from the engine's point of view with one
//! exception: a mage's health and magia are its live combat pools.

pub mod grimoire;
pub mod mage;
pub mod registry;
pub mod spell;
pub mod starter;

pub use grimoire::{Grimoire, GrimoireId};
pub use mage::{Affinity, Mage, MageId, Personality, StatModifiers};
pub use registry::ContentTables;
pub use spell::{EffectKind, EffectTarget, Spell, SpellEffect, SpellId, SpellType};
