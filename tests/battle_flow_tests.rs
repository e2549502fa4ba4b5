//! End-to-end battle flow tests.
//!
//! These drive a `Battle` purely through its commands and check the
//! resulting state and combat log.

use grimoire_duel::battle::Battle;
use grimoire_duel::content::{
    Affinity, ContentTables, Grimoire, GrimoireId, Mage, MageId, Spell, SpellId, SpellType,
};
use grimoire_duel::core::{BattleConfig, BattlePhase, GamePhase, Player, PlayerId, ScriptedRolls};
use grimoire_duel::events::{EventKind, GameEvent};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn tide() -> MageId {
    MageId::new("tide")
}

fn cinder() -> MageId {
    MageId::new("cinder")
}

/// A water mage and a fire mage sharing one grimoire.
fn content() -> ContentTables {
    let mut content = ContentTables::new();
    content.register_spell(
        Spell::new(SpellId::new("wave"), "Wave", SpellType::Attack, Affinity::Water)
            .with_cost(10)
            .with_power(50),
    );
    content.register_spell(
        Spell::new(SpellId::new("spark"), "Spark", SpellType::Attack, Affinity::Fire)
            .with_cost(10)
            .with_power(40)
            .with_uses(2),
    );
    content.register_grimoire(
        Grimoire::new(GrimoireId::new("shared"), "Shared")
            .with_spell(SpellId::new("wave"))
            .with_spell(SpellId::new("spark")),
    );
    content.register_mage(
        Mage::new(tide(), "Tide", Affinity::Water, SpellId::new("wave"))
            .with_health(150)
            .with_attack_power(50)
            .with_wisdom(0)
            .with_agility(10),
    );
    content.register_mage(
        Mage::new(cinder(), "Cinder", Affinity::Fire, SpellId::new("spark"))
            .with_health(100)
            .with_attack_power(50)
            .with_resistance(10)
            .with_agility(5),
    );
    content
}

fn battle() -> Battle<ScriptedRolls> {
    let players = vec![
        Player::new(P0, "Ana").with_roster([tide()]),
        Player::new(P1, "Bo").with_roster([cinder()]),
    ];
    let mut battle = Battle::with_rng(
        BattleConfig::default(),
        content(),
        players,
        ScriptedRolls::never_critical(),
    );
    battle.start_game();
    battle.select_mage(P0, tide());
    battle.select_mage(P1, cinder());
    battle.select_grimoires(P0, [GrimoireId::new("shared")]);
    battle.select_grimoires(P1, [GrimoireId::new("shared")]);
    assert!(battle.start_battle());
    battle
}

fn health(battle: &Battle<ScriptedRolls>, mage: &MageId) -> i64 {
    battle.state().content.mage(mage).unwrap().health
}

/// Run one full round: resolve, then close it.
fn play_round(battle: &mut Battle<ScriptedRolls>) {
    battle.end_turn();
    battle.end_turn();
}

/// Water against fire with 10 resistance: 25 base, 37 after affinity, 33 after resistance.
#[test]
fn test_reference_damage_scenario() {
    let mut battle = battle();

    battle.select_spell(P0, Some(SpellId::new("wave")), false);
    battle.end_turn();

    assert_eq!(health(&battle, &cinder()), 67);

    let dealt = battle
        .state()
        .log
        .events()
        .find(|e| e.kind() == EventKind::DamageDealt)
        .cloned()
        .unwrap();
    assert_eq!(
        dealt,
        GameEvent::DamageDealt {
            target: cinder(),
            amount: 33,
            new_health: 67,
            source: tide(),
            spell: SpellId::new("wave"),
            is_charged: false,
        }
    );
}

/// A spell limited to two uses goes silent on the third attempt.
#[test]
fn test_uses_per_battle_limit() {
    let mut battle = battle();

    for _ in 0..2 {
        battle.select_spell(P1, Some(SpellId::new("spark")), false);
        play_round(&mut battle);
    }
    battle.drain_log();

    battle.select_spell(P1, Some(SpellId::new("spark")), false);
    let summary = battle.end_turn().unwrap();

    assert!(summary.executed.is_empty());
    assert_eq!(summary.skipped.len(), 1);
    let log = battle.drain_log();
    assert!(log
        .iter()
        .all(|e| !matches!(e.kind(), EventKind::MagiaConsumed | EventKind::SpellCast)));
}

/// Innate casts leave the use counter alone; counted casts never touch the innate discount.
#[test]
fn test_innate_and_counted_casts_are_independent() {
    let mut battle = battle();

    // spark is cinder's innate: three innate casts despite a two-use limit
    for _ in 0..3 {
        battle.select_spell(P1, Some(SpellId::new("spark")), true);
        play_round(&mut battle);
    }
    assert_eq!(battle.state().log.count(EventKind::SpellCast), 3);

    let consumed: Vec<i64> = battle
        .state()
        .log
        .events()
        .filter_map(|e| match e {
            GameEvent::MagiaConsumed { amount, .. } => Some(*amount),
            _ => None,
        })
        .collect();
    assert_eq!(consumed, vec![5, 5, 5]);

    // both counted uses are still there
    for _ in 0..2 {
        battle.select_spell(P1, Some(SpellId::new("spark")), false);
        let summary = battle.end_turn().unwrap();
        assert_eq!(summary.executed.len(), 1);
        battle.end_turn();
    }
}

/// The innate flag on a spell that is not the caster's innate pays full price.
#[test]
fn test_innate_flag_on_other_spell_pays_full_cost() {
    let mut battle = battle();

    battle.select_spell(P0, Some(SpellId::new("spark")), true);
    battle.end_turn();

    let magia = battle.state().content.mage(&tide()).unwrap().magia;
    assert_eq!(magia, 90);
}

/// A lethal hit ends the round: the slower caster never acts.
#[test]
fn test_game_over_mid_round() {
    let mut battle = battle();
    let trade_blows = |b: &mut Battle<ScriptedRolls>| {
        b.select_spell(P0, Some(SpellId::new("wave")), false);
        b.select_spell(P1, Some(SpellId::new("spark")), true);
        play_round(b);
    };
    // three waves take cinder from 100 to 1
    for _ in 0..3 {
        trade_blows(&mut battle);
    }
    assert_eq!(health(&battle, &cinder()), 1);
    battle.drain_log();

    battle.select_spell(P0, Some(SpellId::new("wave")), false);
    battle.select_spell(P1, Some(SpellId::new("spark")), true);
    let summary = battle.end_turn().unwrap();

    assert_eq!(summary.winner, Some(P0));
    assert_eq!(battle.winner(), Some(P0));
    assert_eq!(battle.phase(), GamePhase::Result);
    assert_eq!(health(&battle, &cinder()), 0);

    let log = battle.drain_log();
    let casts: Vec<_> = log
        .iter()
        .filter_map(|e| e.event.as_spell_cast())
        .map(|c| c.caster.clone())
        .collect();
    assert_eq!(casts, vec![tide()]);

    let tail: Vec<_> = log.iter().rev().take(3).map(|e| e.event.clone()).collect();
    assert_eq!(
        tail,
        vec![
            GameEvent::PhaseChanged {
                previous: GamePhase::Battle,
                current: GamePhase::Result,
            },
            GameEvent::GameOver {
                winner: P0,
                reason: "Cinder was defeated".to_string(),
            },
            GameEvent::MageDefeated {
                mage: cinder(),
                player: P1,
            },
        ]
    );
}

/// Nothing moves after the result phase.
#[test]
fn test_result_is_terminal() {
    let mut battle = battle();
    for _ in 0..4 {
        battle.select_spell(P0, Some(SpellId::new("wave")), false);
        play_round(&mut battle);
    }
    assert!(battle.is_over());
    battle.drain_log();

    assert!(!battle.select_spell(P0, Some(SpellId::new("wave")), false));
    assert!(battle.end_turn().is_none());
    assert!(!battle.start_battle());
    assert!(battle.drain_log().is_empty());
}

/// Passing produces no action and no log entry for that player.
#[test]
fn test_pass_is_silent() {
    let mut battle = battle();
    battle.select_spell(P0, None, false);
    battle.drain_log();

    let summary = battle.end_turn().unwrap();

    assert!(summary.is_empty());
    let kinds: Vec<_> = battle.drain_log().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![EventKind::BattlePhaseChanged]);
    assert_eq!(battle.battle_phase(), BattlePhase::Execution);
}

/// Turn order is descending agility and drives turn events.
#[test]
fn test_turn_events_follow_turn_order() {
    let mut battle = battle();
    battle.drain_log();

    battle.end_turn();
    battle.end_turn();

    let turns: Vec<_> = battle
        .drain_log()
        .into_iter()
        .filter_map(|e| match e.event {
            GameEvent::TurnEnded { round, player } => Some(("end", round, player)),
            GameEvent::TurnStarted { round, player } => Some(("start", round, player)),
            _ => None,
        })
        .collect();
    assert_eq!(
        turns,
        vec![("end", 1, P0), ("end", 1, P1), ("start", 2, P0), ("start", 2, P1)]
    );
}

/// With three seats, a caster targets the first other seat holding a mage.
#[test]
fn test_three_seat_opponent_resolution() {
    let players = vec![
        Player::new(P0, "Ana").with_roster([tide()]),
        Player::new(P1, "Idle"),
        Player::new(PlayerId::new(2), "Bo").with_roster([cinder()]),
    ];
    let mut battle = Battle::with_rng(
        BattleConfig::new(3),
        content(),
        players,
        ScriptedRolls::never_critical(),
    );
    battle.select_mage(P0, tide());
    battle.select_mage(PlayerId::new(2), cinder());
    battle.select_grimoires(P0, [GrimoireId::new("shared")]);
    battle.start_battle();

    assert_eq!(battle.state().turn_order, vec![P0, PlayerId::new(2)]);

    battle.select_spell(P0, Some(SpellId::new("wave")), false);
    battle.end_turn();

    assert_eq!(health(&battle, &cinder()), 67);
}
