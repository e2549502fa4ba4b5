//! Grimoires: named collections of spells.

use serde::{Deserialize, Serialize};

use super::mage::Affinity;
use super::spell::SpellId;

/// Unique identifier for a grimoire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GrimoireId(pub String);

impl GrimoireId {
    /// Create a new grimoire ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GrimoireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered set of spells a mage can bring into battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grimoire {
    pub id: GrimoireId,
    pub name: String,
    pub description: String,
    pub spells: Vec<SpellId>,
    pub affinity: Option<Affinity>,
}

impl Grimoire {
    /// Create an empty grimoire.
    #[must_use]
    pub fn new(id: GrimoireId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            spells: Vec::new(),
            affinity: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_affinity(mut self, affinity: Affinity) -> Self {
        self.affinity = Some(affinity);
        self
    }

    /// Append a spell (builder pattern). Duplicates are ignored.
    #[must_use]
    pub fn with_spell(mut self, spell: SpellId) -> Self {
        if !self.spells.contains(&spell) {
            self.spells.push(spell);
        }
        self
    }

    /// Check whether the grimoire holds a spell.
    #[must_use]
    pub fn contains(&self, spell: &SpellId) -> bool {
        self.spells.contains(spell)
    }
}
