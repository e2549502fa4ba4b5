//! Content tables for id lookup.
//!
//! `ContentTables` stores every mage, spell and grimoire of a game. Lookups
//! return `Result` so engine code can propagate a missing id with `?` and
//! turn it into a skipped action.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::grimoire::{Grimoire, GrimoireId};
use super::mage::{Mage, MageId};
use super::spell::{Spell, SpellId};
use crate::error::{ContentError, ContentKind};

/// Lookup tables for all game content.
///
/// Mage entries double as live combat state: health and magia are mutated
/// in place during battle.
///
/// ## Example
///
/// ```
/// use grimoire_duel::content::{Affinity, ContentTables, Spell, SpellId, SpellType};
///
/// let mut tables = ContentTables::new();
/// tables.register_spell(Spell::new(SpellId::new("zephyr_001"), "Zephyr", SpellType::Attack, Affinity::Wind));
///
/// assert_eq!(tables.spell(&SpellId::new("zephyr_001")).unwrap().name, "Zephyr");
/// assert!(tables.spell(&SpellId::new("missing")).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTables {
    mages: FxHashMap<MageId, Mage>,
    spells: FxHashMap<SpellId, Spell>,
    grimoires: FxHashMap<GrimoireId, Grimoire>,
}

impl ContentTables {
    /// Create empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mage.
    ///
    /// Panics if a mage with the same ID already exists.
    pub fn register_mage(&mut self, mage: Mage) {
        if self.mages.contains_key(&mage.id) {
            panic!("Mage with ID {} already registered", mage.id);
        }
        self.mages.insert(mage.id.clone(), mage);
    }

    /// Register a spell.
    ///
    /// Panics if a spell with the same ID already exists.
    pub fn register_spell(&mut self, spell: Spell) {
        if self.spells.contains_key(&spell.id) {
            panic!("Spell with ID {} already registered", spell.id);
        }
        self.spells.insert(spell.id.clone(), spell);
    }

    /// Register a grimoire.
    ///
    /// Panics if a grimoire with the same ID already exists.
    pub fn register_grimoire(&mut self, grimoire: Grimoire) {
        if self.grimoires.contains_key(&grimoire.id) {
            panic!("Grimoire with ID {} already registered", grimoire.id);
        }
        self.grimoires.insert(grimoire.id.clone(), grimoire);
    }

    /// Get a mage by ID.
    pub fn mage(&self, id: &MageId) -> Result<&Mage, ContentError> {
        self.mages
            .get(id)
            .ok_or_else(|| ContentError::not_found(ContentKind::Mage, id))
    }

    /// Get a mage by ID for mutation.
    pub fn mage_mut(&mut self, id: &MageId) -> Result<&mut Mage, ContentError> {
        self.mages
            .get_mut(id)
            .ok_or_else(|| ContentError::not_found(ContentKind::Mage, id))
    }

    /// Get a spell by ID.
    pub fn spell(&self, id: &SpellId) -> Result<&Spell, ContentError> {
        self.spells
            .get(id)
            .ok_or_else(|| ContentError::not_found(ContentKind::Spell, id))
    }

    /// Get a grimoire by ID.
    pub fn grimoire(&self, id: &GrimoireId) -> Result<&Grimoire, ContentError> {
        self.grimoires
            .get(id)
            .ok_or_else(|| ContentError::not_found(ContentKind::Grimoire, id))
    }

    #[must_use]
    pub fn contains_mage(&self, id: &MageId) -> bool {
        self.mages.contains_key(id)
    }

    #[must_use]
    pub fn contains_spell(&self, id: &SpellId) -> bool {
        self.spells.contains_key(id)
    }

    #[must_use]
    pub fn contains_grimoire(&self, id: &GrimoireId) -> bool {
        self.grimoires.contains_key(id)
    }

    /// Iterate over all mages, in no particular order.
    pub fn mages(&self) -> impl Iterator<Item = &Mage> {
        self.mages.values()
    }

    /// Iterate over all spells, in no particular order.
    pub fn spells(&self) -> impl Iterator<Item = &Spell> {
        self.spells.values()
    }

    /// Iterate over all grimoires, in no particular order.
    pub fn grimoires(&self) -> impl Iterator<Item = &Grimoire> {
        self.grimoires.values()
    }

    /// Spells of the given grimoires, in grimoire then spell order.
    ///
    /// Missing grimoire or spell ids are skipped.
    pub fn spells_in<'a>(
        &'a self,
        grimoires: &'a [GrimoireId],
    ) -> impl Iterator<Item = &'a Spell> + 'a {
        grimoires
            .iter()
            .filter_map(|g| self.grimoires.get(g))
            .flat_map(|g| g.spells.iter())
            .filter_map(|s| self.spells.get(s))
    }
}
