//! Built-in content: five mages, their grimoires and spells.

use super::grimoire::{Grimoire, GrimoireId};
use super::mage::{Affinity, Mage, MageId, Personality};
use super::registry::ContentTables;
use super::spell::{Spell, SpellEffect, SpellId, SpellType};

fn spell(id: &str, name: &str, spell_type: SpellType, affinity: Affinity) -> Spell {
    Spell::new(SpellId::new(id), name, spell_type, affinity)
}

fn starter_spells() -> Vec<Spell> {
    use Affinity::*;
    use SpellType::*;

    vec![
        spell("rhaz_001", "Rhaz", Attack, Fire)
            .with_description("A ball of fire")
            .with_cost(15)
            .with_power(50)
            .with_uses(5),
        spell("rhazia_001", "Rhazia", Attack, Fire)
            .with_description("A roaring column of flame")
            .with_cost(20)
            .with_power(70)
            .with_uses(3),
        spell("rhazlef_001", "Rhazlef", Attack, Fire)
            .with_description("Sets the target alight")
            .with_cost(12)
            .with_power(30)
            .with_uses(4)
            .with_effect(SpellEffect::status("burn", 3).with_value(5)),
        spell("akua_001", "Akua", Attack, Water)
            .with_description("A ball of water")
            .with_cost(10)
            .with_power(50),
        spell("bhurka_001", "Bhurka", Attack, Water)
            .with_description("A crushing wave")
            .with_cost(18)
            .with_power(65)
            .with_uses(4),
        spell("nuct_001", "Nuct", Utility, Water)
            .with_description("Mends the caster's wounds")
            .with_cost(15)
            .with_power(60)
            .with_uses(3)
            .with_effect(SpellEffect::heal()),
        spell("teryolk_001", "Teryolk", Attack, Earth)
            .with_description("Hurls a boulder")
            .with_cost(10)
            .with_power(45),
        spell("earthquake_001", "Earthquake", Attack, Earth)
            .with_description("Gathers power, then splits the ground")
            .with_cost(10)
            .with_power(100)
            .with_casting_time(2)
            .with_uses(2),
        spell("zephyr_001", "Zephyr", Attack, Wind)
            .with_description("A cutting gust")
            .with_cost(5)
            .with_power(30)
            .with_uses(10),
        spell("bolt_001", "Bolt", Attack, Lightning)
            .with_description("A quick lightning strike")
            .with_cost(12)
            .with_power(55),
        spell("storm_001", "Storm", Attack, Lightning)
            .with_description("Calls down a storm after a round of charging")
            .with_cost(20)
            .with_power(80)
            .with_casting_time(1)
            .with_uses(2),
    ]
}

fn starter_grimoires() -> Vec<Grimoire> {
    let tome = |id: &str, name: &str, description: &str, affinity: Affinity, spells: &[&str]| {
        spells.iter().fold(
            Grimoire::new(GrimoireId::new(id), name)
                .with_description(description)
                .with_affinity(affinity),
            |g, s| g.with_spell(SpellId::new(*s)),
        )
    };

    vec![
        tome(
            "fire_001",
            "Pyromancer's Tome",
            "A grimoire filled with fire spells",
            Affinity::Fire,
            &["rhaz_001", "rhazia_001", "rhazlef_001"],
        ),
        tome(
            "water_001",
            "Aquamancer's Tome",
            "A grimoire filled with water spells",
            Affinity::Water,
            &["akua_001", "bhurka_001", "nuct_001"],
        ),
        tome(
            "earth_001",
            "Terramancer's Tome",
            "A grimoire filled with earth spells",
            Affinity::Earth,
            &["teryolk_001", "earthquake_001"],
        ),
        tome(
            "wind_001",
            "Aeromancer's Tome",
            "A grimoire filled with wind spells",
            Affinity::Wind,
            &["zephyr_001"],
        ),
        tome(
            "lightning_001",
            "Fulminator's Tome",
            "A grimoire filled with lightning spells",
            Affinity::Lightning,
            &["bolt_001", "storm_001"],
        ),
    ]
}

fn starter_mages() -> Vec<Mage> {
    let mage = |id: &str, name: &str, affinity: Affinity, innate: &str, grimoire: &str| {
        Mage::new(MageId::new(id), name, affinity, SpellId::new(innate))
            .with_grimoire(GrimoireId::new(grimoire))
    };

    vec![
        mage("idlad_001", "Idlad", Affinity::Fire, "rhaz_001", "fire_001")
            .with_health(120)
            .with_magia(100)
            .with_magia_regen(10)
            .with_agility(10)
            .with_resistance(5)
            .with_wisdom(12)
            .with_attack_power(50)
            .with_personality(Personality::Aggressive),
        mage("inaui_001", "Inaui", Affinity::Water, "akua_001", "water_001")
            .with_health(95)
            .with_magia(120)
            .with_magia_regen(15)
            .with_agility(20)
            .with_resistance(15)
            .with_wisdom(12)
            .with_attack_power(15)
            .with_personality(Personality::Defensive),
        mage("narnrokhar_001", "Narnrokhar", Affinity::Earth, "teryolk_001", "earth_001")
            .with_health(130)
            .with_magia(80)
            .with_magia_regen(5)
            .with_agility(5)
            .with_resistance(30)
            .with_wisdom(5)
            .with_attack_power(35)
            .with_personality(Personality::Supportive),
        mage("surha_001", "Surha", Affinity::Wind, "zephyr_001", "wind_001")
            .with_health(90)
            .with_magia(130)
            .with_magia_regen(15)
            .with_agility(30)
            .with_resistance(11)
            .with_wisdom(30)
            .with_attack_power(10)
            .with_personality(Personality::Cunning),
        mage("zkilliam_001", "Zkilliam", Affinity::Lightning, "bolt_001", "lightning_001")
            .with_health(100)
            .with_magia(100)
            .with_magia_regen(20)
            .with_agility(30)
            .with_resistance(12)
            .with_wisdom(45)
            .with_attack_power(25)
            .with_personality(Personality::Aggressive),
    ]
}

impl ContentTables {
    /// Tables holding the built-in roster.
    ///
    /// ```
    /// use grimoire_duel::content::{ContentTables, MageId};
    ///
    /// let tables = ContentTables::starter();
    /// let idlad = tables.mage(&MageId::new("idlad_001")).unwrap();
    /// assert_eq!(idlad.max_health, 120);
    /// ```
    #[must_use]
    pub fn starter() -> Self {
        let mut tables = Self::new();
        for spell in starter_spells() {
            tables.register_spell(spell);
        }
        for grimoire in starter_grimoires() {
            tables.register_grimoire(grimoire);
        }
        for mage in starter_mages() {
            tables.register_mage(mage);
        }
        tables
    }

    /// IDs of the built-in mages, in roster order.
    #[must_use]
    pub fn starter_roster() -> Vec<MageId> {
        ["idlad_001", "inaui_001", "narnrokhar_001", "surha_001", "zkilliam_001"]
            .into_iter()
            .map(MageId::new)
            .collect()
    }
}
