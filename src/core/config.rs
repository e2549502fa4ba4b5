//! Battle configuration.
//!
//! Hosts configure the engine at startup by providing:
//! - `CombatRules`: the tunable constants of the combat formulas
//! - `BattleConfig`: seat count, RNG seed, rules, and optional behaviors
//!
//! The defaults reproduce the reference duel exactly.

use serde::{Deserialize, Serialize};

/// Constants used by [`combat::math`](crate::combat::math).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatRules {
    /// Damage multiplier applied on a critical hit.
    pub critical_multiplier: f64,

    /// Fraction of the normal magia cost paid for an innate cast.
    pub innate_cost_ratio: f64,

    /// Floor on damage after resistance.
    pub minimum_damage: i64,
}

impl CombatRules {
    pub const DEFAULT_CRITICAL_MULTIPLIER: f64 = 1.8;
    pub const DEFAULT_INNATE_COST_RATIO: f64 = 0.5;
    pub const DEFAULT_MINIMUM_DAMAGE: i64 = 1;

    /// Set the critical multiplier (builder pattern).
    #[must_use]
    pub fn with_critical_multiplier(mut self, multiplier: f64) -> Self {
        self.critical_multiplier = multiplier;
        self
    }

    /// Set the innate cost ratio (builder pattern).
    #[must_use]
    pub fn with_innate_cost_ratio(mut self, ratio: f64) -> Self {
        self.innate_cost_ratio = ratio;
        self
    }

    /// Set the damage floor (builder pattern).
    #[must_use]
    pub fn with_minimum_damage(mut self, minimum: i64) -> Self {
        self.minimum_damage = minimum;
        self
    }
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            critical_multiplier: Self::DEFAULT_CRITICAL_MULTIPLIER,
            innate_cost_ratio: Self::DEFAULT_INNATE_COST_RATIO,
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
        }
    }
}

/// Complete battle configuration.
///
/// ## Example
///
/// ```
/// use grimoire_duel::core::BattleConfig;
///
/// let config = BattleConfig::new(2).with_seed(7).with_personality();
/// assert_eq!(config.player_count, 2);
/// assert!(config.apply_personality);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Number of seats.
    pub player_count: usize,

    /// Seed for the built-in RNG.
    pub seed: u64,

    /// Combat formula constants.
    pub rules: CombatRules,

    /// Apply each fielded mage's personality modifiers at battle start.
    pub apply_personality: bool,
}

impl BattleConfig {
    /// Create a configuration for `player_count` seats with default rules.
    ///
    /// Panics if `player_count` is zero or above 255.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            seed: 0,
            rules: CombatRules::default(),
            apply_personality: false,
        }
    }

    /// Set the RNG seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the combat rules (builder pattern).
    #[must_use]
    pub fn with_rules(mut self, rules: CombatRules) -> Self {
        self.rules = rules;
        self
    }

    /// Enable personality modifiers (builder pattern).
    #[must_use]
    pub fn with_personality(mut self) -> Self {
        self.apply_personality = true;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_match_reference_values() {
        let rules = CombatRules::default();
        assert_eq!(rules.critical_multiplier, 1.8);
        assert_eq!(rules.innate_cost_ratio, 0.5);
        assert_eq!(rules.minimum_damage, 1);
    }

    #[test]
    fn test_config_builder() {
        let config = BattleConfig::new(3)
            .with_seed(99)
            .with_rules(CombatRules::default().with_critical_multiplier(2.0));

        assert_eq!(config.player_count, 3);
        assert_eq!(config.seed, 99);
        assert_eq!(config.rules.critical_multiplier, 2.0);
        assert!(!config.apply_personality);
    }

    #[test]
    fn test_config_serialization() {
        let config = BattleConfig::default().with_seed(5).with_personality();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: BattleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_zero_players_rejected() {
        let _ = BattleConfig::new(0);
    }
}
