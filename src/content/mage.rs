//! Mages: the combatants.
//!
//! A `Mage` carries both its static profile (stats, affinity, innate spell)
//! and its live pools (health, magia). The live pools are mutated in place
//! by the resolver; everything else is read-only during battle.

use serde::{Deserialize, Serialize};

use super::grimoire::GrimoireId;
use super::spell::SpellId;
use crate::error::ActionError;

/// Unique identifier for a mage.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MageId(pub String);

impl MageId {
    /// Create a new mage ID.
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

impl std::fmt::Display for MageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Elemental affinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affinity {
    Fire,
    Water,
    Wind,
    Earth,
    Lightning,
}

impl Affinity {
    /// Every affinity, in declaration order.
    pub const ALL: [Affinity; 5] = [
        Affinity::Fire,
        Affinity::Water,
        Affinity::Wind,
        Affinity::Earth,
        Affinity::Lightning,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Wind => "wind",
            Self::Earth => "earth",
            Self::Lightning => "lightning",
        }
    }
}

impl std::fmt::Display for Affinity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Temperament of a mage, shifting derived stats by fixed percentages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Personality {
    /// +10% attack power, -10% resistance.
    Aggressive,
    /// +10% resistance, -10% attack power.
    Defensive,
    /// +5% attack power, +5% resistance.
    #[default]
    Balanced,
    /// +5% attack power, +5% agility.
    Cunning,
    /// +5% resistance, +5% magia regeneration.
    Supportive,
}

/// Percentage adjustments a personality applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifiers {
    pub attack_power_pct: i64,
    pub resistance_pct: i64,
    pub agility_pct: i64,
    pub magia_regen_pct: i64,
}

impl Personality {
    /// The stat adjustments for this personality.
    #[must_use]
    pub const fn modifiers(self) -> StatModifiers {
        let (attack_power_pct, resistance_pct, agility_pct, magia_regen_pct) = match self {
            Self::Aggressive => (10, -10, 0, 0),
            Self::Defensive => (-10, 10, 0, 0),
            Self::Balanced => (5, 5, 0, 0),
            Self::Cunning => (5, 0, 5, 0),
            Self::Supportive => (0, 5, 0, 5),
        };
        StatModifiers {
            attack_power_pct,
            resistance_pct,
            agility_pct,
            magia_regen_pct,
        }
    }
}

fn scale_pct(value: i64, pct: i64) -> i64 {
    (value * (100 + pct)).div_euclid(100)
}

/// A combatant.
///
/// ## Example
///
/// ```
/// use grimoire_duel::content::{Affinity, Mage, MageId, SpellId};
///
/// let mage = Mage::new(MageId::new("idlad_001"), "Idlad", Affinity::Fire, SpellId::new("rhaz_001"))
///     .with_health(120)
///     .with_attack_power(50);
///
/// assert_eq!(mage.health, 120);
/// assert_eq!(mage.max_health, 120);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mage {
    pub id: MageId,
    pub name: String,

    pub health: i64,
    pub max_health: i64,

    pub magia: i64,
    pub max_magia: i64,
    /// Magia restored at the end of every round.
    pub magia_regen_rate: i64,

    /// Turn order and ordering tiebreaks. Higher acts first.
    pub agility: i64,
    /// Flat percentage damage reduction.
    pub resistance: i64,
    /// Critical-hit chance in percent.
    pub wisdom: i64,
    /// Scalar for spell damage and healing.
    pub attack_power: i64,

    pub affinity: Affinity,
    pub personality: Personality,

    /// Always castable at the innate discount, with unlimited uses.
    pub innate_spell: SpellId,
    pub grimoires: Vec<GrimoireId>,
}

impl Mage {
    /// Create a mage with middling stats.
    #[must_use]
    pub fn new(id: MageId, name: impl Into<String>, affinity: Affinity, innate_spell: SpellId) -> Self {
        Self {
            id,
            name: name.into(),
            health: 100,
            max_health: 100,
            magia: 100,
            max_magia: 100,
            magia_regen_rate: 10,
            agility: 10,
            resistance: 0,
            wisdom: 0,
            attack_power: 50,
            affinity,
            personality: Personality::default(),
            innate_spell,
            grimoires: Vec::new(),
        }
    }

    /// Set current and maximum health (builder pattern).
    #[must_use]
    pub fn with_health(mut self, health: i64) -> Self {
        self.health = health;
        self.max_health = health;
        self
    }

    /// Set current and maximum magia (builder pattern).
    #[must_use]
    pub fn with_magia(mut self, magia: i64) -> Self {
        self.magia = magia;
        self.max_magia = magia;
        self
    }

    #[must_use]
    pub fn with_magia_regen(mut self, rate: i64) -> Self {
        self.magia_regen_rate = rate;
        self
    }

    #[must_use]
    pub fn with_agility(mut self, agility: i64) -> Self {
        self.agility = agility;
        self
    }

    #[must_use]
    pub fn with_resistance(mut self, resistance: i64) -> Self {
        self.resistance = resistance;
        self
    }

    #[must_use]
    pub fn with_wisdom(mut self, wisdom: i64) -> Self {
        self.wisdom = wisdom;
        self
    }

    #[must_use]
    pub fn with_attack_power(mut self, attack_power: i64) -> Self {
        self.attack_power = attack_power;
        self
    }

    #[must_use]
    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = personality;
        self
    }

    /// Add an owned grimoire (builder pattern).
    #[must_use]
    pub fn with_grimoire(mut self, grimoire: GrimoireId) -> Self {
        self.grimoires.push(grimoire);
        self
    }

    /// True once health has reached zero.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Subtract health, clamping at zero. Returns the new health.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        self.health = (self.health - amount).max(0);
        self.health
    }

    /// Add health, clamping at `max_health`. Returns the new health.
    pub fn heal(&mut self, amount: i64) -> i64 {
        self.health = (self.health + amount).min(self.max_health);
        self.health
    }

    /// Pay a magia cost. Returns the remaining magia.
    ///
    /// Leaves the pool untouched when it cannot cover the cost.
    pub fn spend_magia(&mut self, cost: i64) -> Result<i64, ActionError> {
        if self.magia < cost {
            return Err(ActionError::InsufficientMagia {
                required: cost,
                available: self.magia,
            });
        }
        self.magia -= cost;
        Ok(self.magia)
    }

    /// Restore `magia_regen_rate` magia, clamped at `max_magia`.
    ///
    /// Returns the amount actually restored.
    pub fn regenerate_magia(&mut self) -> i64 {
        let before = self.magia;
        self.magia = (self.magia + self.magia_regen_rate.max(0)).min(self.max_magia);
        (self.magia - before).max(0)
    }

    /// Apply this mage's personality modifiers to its derived stats.
    ///
    /// Not idempotent: call once per battle.
    pub fn apply_personality(&mut self) {
        let mods = self.personality.modifiers();
        self.attack_power = scale_pct(self.attack_power, mods.attack_power_pct);
        self.resistance = scale_pct(self.resistance, mods.resistance_pct);
        self.agility = scale_pct(self.agility, mods.agility_pct);
        self.magia_regen_rate = scale_pct(self.magia_regen_rate, mods.magia_regen_pct);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mage() -> Mage {
        Mage::new(MageId::new("m"), "Test", Affinity::Water, SpellId::new("s"))
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut m = mage().with_health(30);

        assert_eq!(m.take_damage(10), 20);
        assert!(!m.is_defeated());
        assert_eq!(m.take_damage(50), 0);
        assert!(m.is_defeated());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut m = mage().with_health(100);
        m.take_damage(15);

        assert_eq!(m.heal(10), 95);
        assert_eq!(m.heal(10), 100);
    }

    #[test]
    fn test_spend_magia() {
        let mut m = mage().with_magia(20);

        assert_eq!(m.spend_magia(15), Ok(5));
        assert_eq!(
            m.spend_magia(6),
            Err(ActionError::InsufficientMagia {
                required: 6,
                available: 5
            })
        );
        assert_eq!(m.magia, 5);
    }

    #[test]
    fn test_regenerate_magia_clamps() {
        let mut m = mage().with_magia(50).with_magia_regen(15);
        m.spend_magia(10).unwrap();

        assert_eq!(m.regenerate_magia(), 10);
        assert_eq!(m.magia, 50);
        assert_eq!(m.regenerate_magia(), 0);
    }

    #[test]
    fn test_personality_modifiers() {
        let mut m = mage()
            .with_attack_power(50)
            .with_resistance(30)
            .with_personality(Personality::Aggressive);
        m.apply_personality();
        assert_eq!(m.attack_power, 55);
        assert_eq!(m.resistance, 27);

        let mut s = mage()
            .with_resistance(11)
            .with_magia_regen(15)
            .with_personality(Personality::Supportive);
        s.apply_personality();
        assert_eq!(s.resistance, 11);
        assert_eq!(s.magia_regen_rate, 15);

        let mut c = mage()
            .with_agility(30)
            .with_personality(Personality::Cunning);
        c.apply_personality();
        assert_eq!(c.agility, 31);
    }

    #[test]
    fn test_mage_serialization() {
        let m = mage().with_grimoire(GrimoireId::new("water_001"));
        let json = serde_json::to_string(&m).unwrap();
        let deserialized: Mage = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
