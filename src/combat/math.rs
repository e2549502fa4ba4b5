//! Combat formulas.
//!
//! Pure functions over mages and spells. The only randomness is the
//! critical-hit roll, drawn exactly once per [`compute_damage`] call from the
//! injected [`RandomSource`].
//!
//! ## Damage pipeline
//!
//! 1. `base = floor(base_power * attack_power / 100)`
//! 2. `floor(base * affinity_multiplier)`
//! 3. on a critical hit (`roll < wisdom / 100`), `floor(d * critical_multiplier)`
//! 4. `max(minimum_damage, floor(d * (1 - resistance / 100)))`
//!
//! ```
//! use grimoire_duel::combat::math::{affinity_multiplier, base_damage};
//! use grimoire_duel::content::Affinity;
//!
//! assert_eq!(base_damage(50, 50), 25);
//! assert_eq!(affinity_multiplier(Affinity::Water, Affinity::Fire), 1.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::content::{Affinity, Mage, Spell};
use crate::core::{CombatRules, RandomSource};

/// Damage multiplier of an attacker affinity against a defender affinity.
///
/// The table is asymmetric: only the listed attacker/defender directions
/// differ from 1.0.
#[must_use]
pub fn affinity_multiplier(attacker: Affinity, defender: Affinity) -> f64 {
    use Affinity::*;

    if attacker == defender {
        return 0.8;
    }
    match (attacker, defender) {
        (Water, Fire) => 1.5,
        (Fire, Earth) => 1.2,
        (Earth, Lightning) => 0.5,
        (Wind, Earth) => 1.2,
        (Lightning, Water) => 1.5,
        _ => 1.0,
    }
}

/// `floor(base_power * attack_power / 100)`.
#[must_use]
pub fn base_damage(base_power: i64, attack_power: i64) -> i64 {
    (base_power * attack_power).div_euclid(100)
}

/// Heal amount before clamping to max health. Same scaling as damage.
#[must_use]
pub fn compute_heal(base_power: i64, attack_power: i64) -> i64 {
    base_damage(base_power, attack_power)
}

/// `floor(cost * innate_cost_ratio)`.
#[must_use]
pub fn innate_cost(magia_cost: i64, rules: &CombatRules) -> i64 {
    (magia_cost as f64 * rules.innate_cost_ratio).floor() as i64
}

/// Magia a cast actually costs.
///
/// The innate discount applies only when the cast is flagged innate and the
/// spell is the caster's own innate spell.
#[must_use]
pub fn cast_cost(caster: &Mage, spell: &Spell, innate: bool, rules: &CombatRules) -> i64 {
    if is_innate_cast(caster, spell, innate) {
        innate_cost(spell.magia_cost, rules)
    } else {
        spell.magia_cost
    }
}

/// True when a cast counts as the caster's innate spell.
#[must_use]
pub fn is_innate_cast(caster: &Mage, spell: &Spell, innate: bool) -> bool {
    innate && spell.id == caster.innate_spell
}

/// Result of one damage computation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageRoll {
    /// Final damage after resistance.
    pub amount: i64,
    pub affinity_multiplier: f64,
    pub critical: bool,
    /// Carried for event tagging. Does not change the amount.
    pub is_charged: bool,
}

/// Apply resistance and the damage floor.
#[must_use]
pub fn apply_resistance(damage: i64, resistance: i64, rules: &CombatRules) -> i64 {
    let resisted = (damage as f64 * (1.0 - resistance as f64 / 100.0)).floor() as i64;
    resisted.max(rules.minimum_damage)
}

/// Damage `caster` deals to `target` with `spell`.
///
/// Draws exactly one value from `rng` for the critical roll, even at zero
/// wisdom.
pub fn compute_damage<R: RandomSource + ?Sized>(
    caster: &Mage,
    target: &Mage,
    spell: &Spell,
    is_charged: bool,
    rules: &CombatRules,
    rng: &mut R,
) -> DamageRoll {
    let base = base_damage(spell.base_power, caster.attack_power);
    let multiplier = affinity_multiplier(caster.affinity, target.affinity);
    let mut damage = (base as f64 * multiplier).floor() as i64;

    let roll = rng.next_f64();
    let critical = roll < caster.wisdom as f64 / 100.0;
    if critical {
        damage = (damage as f64 * rules.critical_multiplier).floor() as i64;
    }

    DamageRoll {
        amount: apply_resistance(damage, target.resistance, rules),
        affinity_multiplier: multiplier,
        critical,
        is_charged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{MageId, SpellId, SpellType};
    use crate::core::ScriptedRolls;

    fn mage(affinity: Affinity) -> Mage {
        Mage::new(MageId::new("m"), "M", affinity, SpellId::new("innate"))
    }

    fn spell(power: i64) -> Spell {
        Spell::new(SpellId::new("s"), "S", SpellType::Attack, Affinity::Water).with_power(power)
    }

    #[test]
    fn test_affinity_table_exact() {
        use Affinity::*;

        assert_eq!(affinity_multiplier(Water, Fire), 1.5);
        assert_eq!(affinity_multiplier(Fire, Earth), 1.2);
        assert_eq!(affinity_multiplier(Earth, Lightning), 0.5);
        assert_eq!(affinity_multiplier(Wind, Earth), 1.2);
        assert_eq!(affinity_multiplier(Lightning, Water), 1.5);

        // reverse directions are neutral
        assert_eq!(affinity_multiplier(Fire, Water), 1.0);
        assert_eq!(affinity_multiplier(Earth, Wind), 1.0);
        assert_eq!(affinity_multiplier(Lightning, Earth), 1.0);

        for a in Affinity::ALL {
            assert_eq!(affinity_multiplier(a, a), 0.8);
        }
    }

    #[test]
    fn test_reference_scenario() {
        let caster = mage(Affinity::Water).with_attack_power(50).with_wisdom(0);
        let target = mage(Affinity::Fire).with_resistance(10);
        let mut rng = ScriptedRolls::never_critical();

        let roll = compute_damage(&caster, &target, &spell(50), false, &CombatRules::default(), &mut rng);

        assert_eq!(roll.amount, 33);
        assert!(!roll.critical);
        assert_eq!(rng.drawn(), 1);
    }

    #[test]
    fn test_critical_hit() {
        let caster = mage(Affinity::Wind).with_attack_power(50).with_wisdom(30);
        let target = mage(Affinity::Fire);
        let rules = CombatRules::default();

        // base 25, neutral, crit floor(25 * 1.8) = 45
        let mut crit = ScriptedRolls::new([0.29]);
        let roll = compute_damage(&caster, &target, &spell(50), false, &rules, &mut crit);
        assert!(roll.critical);
        assert_eq!(roll.amount, 45);

        let mut miss = ScriptedRolls::new([0.30]);
        let roll = compute_damage(&caster, &target, &spell(50), false, &rules, &mut miss);
        assert!(!roll.critical);
        assert_eq!(roll.amount, 25);
    }

    #[test]
    fn test_minimum_damage_floor() {
        let caster = mage(Affinity::Earth).with_attack_power(1);
        let target = mage(Affinity::Lightning).with_resistance(100);
        let mut rng = ScriptedRolls::never_critical();

        let roll = compute_damage(&caster, &target, &spell(1), true, &CombatRules::default(), &mut rng);

        assert_eq!(roll.amount, 1);
        assert!(roll.is_charged);
    }

    #[test]
    fn test_innate_cost() {
        let rules = CombatRules::default();
        assert_eq!(innate_cost(15, &rules), 7);
        assert_eq!(innate_cost(10, &rules), 5);
        assert_eq!(innate_cost(1, &rules), 0);

        let caster = mage(Affinity::Fire);
        let innate = Spell::new(SpellId::new("innate"), "I", SpellType::Attack, Affinity::Fire).with_cost(15);
        let other = spell(50).with_cost(15);

        assert_eq!(cast_cost(&caster, &innate, true, &rules), 7);
        assert_eq!(cast_cost(&caster, &innate, false, &rules), 15);
        assert_eq!(cast_cost(&caster, &other, true, &rules), 15);
    }

    #[test]
    fn test_heal_amount() {
        assert_eq!(compute_heal(60, 15), 9);
        assert_eq!(compute_heal(0, 50), 0);
    }
}
