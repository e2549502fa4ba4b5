//! Property tests for the combat formulas and round bookkeeping.

use proptest::prelude::*;

use grimoire_duel::combat::math::{
    affinity_multiplier, base_damage, cast_cost, compute_damage, innate_cost,
};
use grimoire_duel::content::{Affinity, ContentTables, Mage, MageId, Spell, SpellId, SpellType};
use grimoire_duel::core::{CombatRules, GameState, Player, PlayerId, ScriptedRolls, SpellUses};

fn arb_affinity() -> impl Strategy<Value = Affinity> {
    prop_oneof![
        Just(Affinity::Fire),
        Just(Affinity::Water),
        Just(Affinity::Earth),
        Just(Affinity::Wind),
        Just(Affinity::Lightning),
    ]
}

fn mage(id: &str, affinity: Affinity) -> Mage {
    Mage::new(MageId::new(id), id, affinity, SpellId::new("innate"))
}

fn spell(power: i64, cost: i64) -> Spell {
    Spell::new(SpellId::new("s"), "S", SpellType::Attack, Affinity::Fire)
        .with_power(power)
        .with_cost(cost)
}

const ADVANTAGED: [(Affinity, Affinity); 5] = [
    (Affinity::Water, Affinity::Fire),
    (Affinity::Fire, Affinity::Earth),
    (Affinity::Earth, Affinity::Lightning),
    (Affinity::Wind, Affinity::Earth),
    (Affinity::Lightning, Affinity::Water),
];

proptest! {
    #[test]
    fn prop_damage_at_least_one(
        power in 0i64..300,
        attack in 0i64..200,
        wisdom in 0i64..=100,
        resistance in 0i64..=100,
        roll in 0.0f64..1.0,
        attacker in arb_affinity(),
        defender in arb_affinity(),
    ) {
        let caster = mage("a", attacker).with_attack_power(attack).with_wisdom(wisdom);
        let target = mage("b", defender).with_resistance(resistance);
        let mut rng = ScriptedRolls::new([roll]);

        let dealt = compute_damage(&caster, &target, &spell(power, 0), false, &CombatRules::default(), &mut rng);

        prop_assert!(dealt.amount >= 1, "damage was {}", dealt.amount);
        prop_assert_eq!(rng.drawn(), 1);
    }

    #[test]
    fn prop_damage_never_exceeds_critical_ceiling(
        power in 0i64..300,
        attack in 0i64..200,
        attacker in arb_affinity(),
        defender in arb_affinity(),
    ) {
        let caster = mage("a", attacker).with_attack_power(attack).with_wisdom(100);
        let target = mage("b", defender);
        let rules = CombatRules::default();
        let mut rng = ScriptedRolls::always_critical();

        let dealt = compute_damage(&caster, &target, &spell(power, 0), false, &rules, &mut rng);

        let ceiling = (base_damage(power, attack) as f64 * 1.5 * rules.critical_multiplier).floor() as i64;
        prop_assert!(dealt.critical);
        prop_assert!(dealt.amount <= ceiling.max(rules.minimum_damage));
    }

    #[test]
    fn prop_heal_never_exceeds_max(max in 1i64..500, missing in 0i64..500, amount in 0i64..1000) {
        let mut m = mage("m", Affinity::Water).with_health(max);
        m.take_damage(missing);

        let new_health = m.heal(amount);

        prop_assert!(new_health <= max);
        prop_assert!(new_health >= 0);
        prop_assert_eq!(new_health, m.health);
    }

    #[test]
    fn prop_health_never_negative(health in 1i64..500, hits in proptest::collection::vec(0i64..200, 0..10)) {
        let mut m = mage("m", Affinity::Earth).with_health(health);
        for hit in hits {
            let new_health = m.take_damage(hit);
            prop_assert!(new_health >= 0);
        }
        prop_assert_eq!(m.is_defeated(), m.health == 0);
    }

    #[test]
    fn prop_innate_cost_is_half_floor(cost in 0i64..10_000) {
        let rules = CombatRules::default();
        let caster = mage("m", Affinity::Fire);
        let innate = Spell::new(SpellId::new("innate"), "Innate", SpellType::Attack, Affinity::Fire)
            .with_cost(cost);

        prop_assert_eq!(innate_cost(cost, &rules), cost / 2);
        prop_assert_eq!(cast_cost(&caster, &innate, true, &rules), cost / 2);
        prop_assert_eq!(cast_cost(&caster, &innate, false, &rules), cost);
        prop_assert_eq!(cast_cost(&caster, &spell(0, cost), true, &rules), cost);
    }

    #[test]
    fn prop_affinity_table(attacker in arb_affinity(), defender in arb_affinity()) {
        let multiplier = affinity_multiplier(attacker, defender);

        if attacker == defender {
            prop_assert_eq!(multiplier, 0.8);
        } else if ADVANTAGED.contains(&(attacker, defender)) {
            prop_assert!(multiplier == 1.5 || multiplier == 1.2 || multiplier == 0.5);
        } else {
            prop_assert_eq!(multiplier, 1.0);
        }
    }

    #[test]
    fn prop_uses_never_negative(limit in proptest::option::of(0u32..10), casts in 0usize..20) {
        let mut uses = SpellUses::from_limit(limit);
        for _ in 0..casts {
            uses = uses.consumed();
        }

        match limit {
            None => prop_assert_eq!(uses, SpellUses::Unlimited),
            Some(n) => {
                let left = n.saturating_sub(casts as u32);
                prop_assert_eq!(uses, SpellUses::Remaining(left));
                prop_assert_eq!(uses.available(), left > 0);
            }
        }
    }

    #[test]
    fn prop_turn_order_stable_descending(agilities in proptest::collection::vec(0i64..50, 1..8)) {
        let mut content = ContentTables::new();
        let mut players = Vec::new();
        for (i, agility) in agilities.iter().enumerate() {
            let id = format!("m{i}");
            content.register_mage(mage(&id, Affinity::Wind).with_agility(*agility));
            let mut player = Player::new(PlayerId::new(i as u8), id.clone());
            player.selected_mage = Some(MageId::new(id));
            players.push(player);
        }
        let mut state = GameState::new(content, players);

        let order = state.compute_turn_order().to_vec();

        prop_assert_eq!(order.len(), agilities.len());
        for pair in order.windows(2) {
            let (a, b) = (agilities[pair[0].index()], agilities[pair[1].index()]);
            prop_assert!(a > b || (a == b && pair[0] < pair[1]));
        }
    }
}
