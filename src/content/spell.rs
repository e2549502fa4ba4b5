//! Spell definitions and their effects.
//!
//! A spell's primary damage or heal amount always derives from its
//! `base_power` and the caster's attack power. The `value` on a
//! [`SpellEffect`] is a secondary magnitude (DOT or regen percentage) that
//! the core carries but does not interpret.

use serde::{Deserialize, Serialize};

use super::mage::Affinity;

/// Unique identifier for a spell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpellId(pub String);

impl SpellId {
    /// Create a new spell ID.
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

impl std::fmt::Display for SpellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broad spell category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellType {
    /// Deals damage. Attack spells with no effects hit for default damage.
    Attack,
    Utility,
}

/// What a spell effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Damage,
    Heal,
    Buff,
    Debuff,
    Status,
}

impl EffectKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Heal => "heal",
            Self::Buff => "buff",
            Self::Debuff => "debuff",
            Self::Status => "status",
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared target selector of an effect.
///
/// Carried as data. Damage always lands on the opponent and heals on the
/// caster regardless of this field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The caster itself ("self").
    Caster,
    Opponent,
    All,
    Allies,
    Enemies,
    Random,
}

/// One effect declared by a spell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEffect {
    pub kind: EffectKind,
    pub target: EffectTarget,
    /// Secondary magnitude in percent, e.g. burn damage per round.
    pub value: i64,
    /// Rounds the effect lasts, if it persists.
    pub duration: Option<u32>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl SpellEffect {
    /// Create an effect with no magnitude, duration or name.
    #[must_use]
    pub fn new(kind: EffectKind, target: EffectTarget) -> Self {
        Self {
            kind,
            target,
            value: 0,
            duration: None,
            name: None,
            description: None,
        }
    }

    /// Damage to the opponent.
    #[must_use]
    pub fn damage() -> Self {
        Self::new(EffectKind::Damage, EffectTarget::Opponent)
    }

    /// Heal on the caster.
    #[must_use]
    pub fn heal() -> Self {
        Self::new(EffectKind::Heal, EffectTarget::Caster)
    }

    /// A named status on the opponent lasting `duration` rounds.
    #[must_use]
    pub fn status(name: impl Into<String>, duration: u32) -> Self {
        Self::new(EffectKind::Status, EffectTarget::Opponent)
            .with_name(name)
            .with_duration(duration)
    }

    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Static definition of a spell.
///
/// ## Example
///
/// ```
/// use grimoire_duel::content::{Affinity, Spell, SpellId, SpellType};
///
/// let quake = Spell::new(SpellId::new("earthquake_001"), "Earthquake", SpellType::Attack, Affinity::Earth)
///     .with_cost(10)
///     .with_power(100)
///     .with_casting_time(2);
///
/// assert!(quake.is_charging());
/// assert!(quake.uses_per_battle.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    pub description: String,
    pub magia_cost: i64,
    /// Percentage applied to the caster's attack power.
    pub base_power: i64,
    /// Rounds spent charging before the spell fires. 0 resolves this round.
    pub casting_time: u32,
    pub spell_type: SpellType,
    pub affinity: Affinity,
    pub effects: Vec<SpellEffect>,
    /// `None` means unlimited.
    pub uses_per_battle: Option<u32>,
}

impl Spell {
    /// Create an instant spell with cost 10 and power 50.
    #[must_use]
    pub fn new(id: SpellId, name: impl Into<String>, spell_type: SpellType, affinity: Affinity) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            magia_cost: 10,
            base_power: 50,
            casting_time: 0,
            spell_type,
            affinity,
            effects: Vec::new(),
            uses_per_battle: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the magia cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.magia_cost = cost;
        self
    }

    /// Set the base power (builder pattern).
    #[must_use]
    pub fn with_power(mut self, power: i64) -> Self {
        self.base_power = power;
        self
    }

    #[must_use]
    pub fn with_casting_time(mut self, rounds: u32) -> Self {
        self.casting_time = rounds;
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: SpellEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Limit the number of casts per battle (builder pattern).
    #[must_use]
    pub fn with_uses(mut self, uses: u32) -> Self {
        self.uses_per_battle = Some(uses);
        self
    }

    /// Check whether any declared effect is of the given kind.
    #[must_use]
    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// True if the spell charges for one or more rounds before firing.
    #[must_use]
    pub fn is_charging(&self) -> bool {
        self.casting_time > 0
    }

    /// An attack with no declared effects hits for default damage.
    #[must_use]
    pub fn uses_default_damage(&self) -> bool {
        self.effects.is_empty() && self.spell_type == SpellType::Attack
    }

    /// A status effect on an attack with no damage effect still deals default damage.
    #[must_use]
    pub fn status_carries_damage(&self) -> bool {
        self.spell_type == SpellType::Attack && !self.has_effect(EffectKind::Damage)
    }
}
