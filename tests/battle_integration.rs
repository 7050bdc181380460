//! Battle engine integration tests

use crownfield::battle::{
    Attributes, BattleEngine, BattleUnit, Player, Terrain, TerrainKind, UnitKind,
};
use crownfield::core::config::BattleConfig;
use crownfield::core::types::{GridPos, PlayerId};

fn troop(name: &str) -> BattleUnit {
    BattleUnit::new(
        name,
        UnitKind::Troop,
        Attributes {
            combat: 8,
            accuracy: 4,
            focus: 2,
            armor: 2,
            vitality: 5,
        },
    )
}

fn skirmish(seed: u64) -> BattleEngine {
    let mut engine = BattleEngine::new(BattleConfig {
        seed,
        ..Default::default()
    })
    .unwrap();

    engine
        .start_battle(
            Terrain::new(TerrainKind::Forest, (8, 2)),
            vec![
                Player::new(PlayerId(1), "Aldric", vec![troop("Aldric's levy")]),
                Player::new(PlayerId(2), "Berta", vec![troop("Berta's levy")]),
            ],
        )
        .unwrap();
    engine
}

#[test]
fn test_two_player_skirmish_flow() {
    let mut engine = skirmish(42);

    // Deployment put both units on distinct cells inside the 10x10 grid
    let battle = engine.battle().unwrap();
    let positions: Vec<GridPos> = battle.all_units().map(|u| u.position).collect();
    assert_eq!(positions.len(), 2);
    assert_ne!(positions[0], positions[1]);
    for pos in &positions {
        assert!(pos.x < 10 && pos.y < 10);
    }

    // Auction: 3 vs 5 puts Berta first
    assert!(engine.declare_supply(PlayerId(1), 3));
    assert!(engine.declare_supply(PlayerId(2), 5));
    assert_eq!(
        engine.turn_state().action_order,
        vec![PlayerId(2), PlayerId(1)]
    );

    // During Berta's slice, Aldric's unit cannot move
    let aldric_unit = engine.battle().unwrap().players[0].units[0].id;
    let before = engine.battle().unwrap().get_unit(aldric_unit).unwrap().position;
    let target = GridPos::new(before.x, if before.y > 0 { before.y - 1 } else { before.y + 1 });
    engine.update_unit_position(aldric_unit, target.x, target.y);
    assert_eq!(
        engine.battle().unwrap().get_unit(aldric_unit).unwrap().position,
        before
    );
    assert!(!engine.is_selectable(aldric_unit));

    // Berta's unit can
    let berta_unit = engine.battle().unwrap().players[1].units[0].id;
    assert!(engine.is_selectable(berta_unit));
    let b_before = engine.battle().unwrap().get_unit(berta_unit).unwrap().position;
    let b_target = GridPos::new(
        b_before.x,
        if b_before.y > 0 { b_before.y - 1 } else { b_before.y + 1 },
    );
    engine.update_unit_position(berta_unit, b_target.x, b_target.y);
    assert_eq!(
        engine.battle().unwrap().get_unit(berta_unit).unwrap().position,
        b_target
    );
    assert_eq!(engine.selected_unit().unwrap().id, berta_unit);

    // Advance: Aldric's slice, budgets refilled for everyone
    engine.next_turn();
    assert_eq!(engine.turn_state().current_player(), Some(PlayerId(1)));
    assert_eq!(engine.turn_state().movement_left(berta_unit), 4);
    engine.update_unit_position(aldric_unit, target.x, target.y);
    assert_eq!(
        engine.battle().unwrap().get_unit(aldric_unit).unwrap().position,
        target
    );
}

#[test]
fn test_melee_and_teardown() {
    let mut engine = BattleEngine::new(BattleConfig {
        seed: 7,
        ..Default::default()
    })
    .unwrap();

    let regent = |name: &str| {
        BattleUnit::new(
            name,
            UnitKind::Regent,
            Attributes {
                combat: 12,
                accuracy: 9,
                focus: 6,
                armor: 4,
                vitality: 12,
            },
        )
    };

    let aldric_regent = regent("Aldric");
    let berta_regent = regent("Berta");
    let (attacker, defender) = (aldric_regent.id, berta_regent.id);

    engine
        .start_battle(
            Terrain::new(TerrainKind::Forest, (8, 2)),
            vec![
                Player::new(PlayerId(1), "Aldric", vec![aldric_regent]),
                Player::new(PlayerId(2), "Berta", vec![berta_regent]),
            ],
        )
        .unwrap();

    // March Aldric's regent at Berta's, one slice at a time. Three marks at
    // nine movement each always covers a 10x10 deployment gap.
    for _ in 0..12 {
        let a = engine.battle().unwrap().get_unit(attacker).unwrap().position;
        let b = engine.battle().unwrap().get_unit(defender).unwrap().position;
        if a.chebyshev_distance(&b) == 1 {
            break;
        }
        if engine.turn_state().current_player() == Some(PlayerId(1))
            && engine.is_selectable(attacker)
        {
            let budget = engine.turn_state().movement_left(attacker);
            let step = step_toward(a, b, budget);
            engine.update_unit_position(attacker, step.x, step.y);
        }
        engine.next_turn();
        let marks = engine.battle().unwrap().get_unit(attacker).unwrap().action_marks;
        assert!(marks <= 3);
    }

    let a = engine.battle().unwrap().get_unit(attacker).unwrap().position;
    let b = engine.battle().unwrap().get_unit(defender).unwrap().position;
    assert_eq!(a.chebyshev_distance(&b), 1, "regent failed to close distance");

    // Make it Aldric's slice with a fresh lock, then resolve the attack
    while engine.turn_state().current_player() != Some(PlayerId(1)) {
        engine.next_turn();
    }
    let hp_before = engine.battle().unwrap().get_unit(defender).unwrap().current_hp;
    let outcome = engine.attack(attacker, defender).expect("attack resolves");
    assert_eq!(outcome.rolls.len(), 3); // combat 12
    assert!(outcome.hits <= 3);
    let hp_after = engine.battle().unwrap().get_unit(defender).unwrap().current_hp;
    assert_eq!(hp_after, hp_before.saturating_sub(outcome.hits));

    // Teardown clears everything and zeroes marks on the returned session
    let session = engine.end_battle().expect("live session");
    assert!(session.all_units().all(|u| u.action_marks == 0));
    let state = engine.turn_state();
    assert!(state.action_order.is_empty());
    assert!(state.declared_supplies.is_empty());
    assert!(state.acted_unit_ids.is_empty());
    assert!(state.unit_movement_left.is_empty());
    assert!(engine.battle().is_none());
}

#[test]
fn test_mark_cap_varies_by_kind() {
    let mut engine = BattleEngine::new(BattleConfig {
        seed: 3,
        ..Default::default()
    })
    .unwrap();

    let hero = BattleUnit::new(
        "wandering knight",
        UnitKind::Hero,
        Attributes {
            combat: 10,
            accuracy: 6,
            focus: 4,
            armor: 3,
            vitality: 9,
        },
    );
    let hero_id = hero.id;

    engine
        .start_battle(
            Terrain::new(TerrainKind::Mountain, (1, 1)),
            vec![
                Player::new(PlayerId(1), "Aldric", vec![hero]),
                Player::new(PlayerId(2), "Berta", vec![troop("Berta's levy")]),
            ],
        )
        .unwrap();

    // A hero may act in two different slices before exhausting its marks
    for expected_marks in 1..=2u32 {
        while engine.turn_state().current_player() != Some(PlayerId(1)) {
            engine.next_turn();
        }
        assert!(engine.is_selectable(hero_id));
        let pos = engine.battle().unwrap().get_unit(hero_id).unwrap().position;
        let target = GridPos::new(pos.x, if pos.y > 0 { pos.y - 1 } else { pos.y + 1 });
        engine.update_unit_position(hero_id, target.x, target.y);
        assert_eq!(
            engine.battle().unwrap().get_unit(hero_id).unwrap().action_marks,
            expected_marks
        );
        engine.next_turn();
    }

    // Third time around the cap holds
    while engine.turn_state().current_player() != Some(PlayerId(1)) {
        engine.next_turn();
    }
    assert!(!engine.is_selectable(hero_id));
    let pos = engine.battle().unwrap().get_unit(hero_id).unwrap().position;
    let target = GridPos::new(pos.x, if pos.y > 0 { pos.y - 1 } else { pos.y + 1 });
    engine.update_unit_position(hero_id, target.x, target.y);
    assert_eq!(
        engine.battle().unwrap().get_unit(hero_id).unwrap().position,
        pos
    );
}

#[test]
fn test_zero_hp_unit_stays_on_the_grid() {
    let mut engine = skirmish(11);
    let berta_unit = engine.battle().unwrap().players[1].units[0].id;

    engine.apply_damage_to_unit(berta_unit, 99);
    let unit = engine.battle().unwrap().get_unit(berta_unit).unwrap();
    assert_eq!(unit.current_hp, 0);

    // No death rule: the unit is still present and still selectable on
    // Berta's slice
    engine.next_turn();
    assert_eq!(engine.turn_state().current_player(), Some(PlayerId(2)));
    assert!(engine.is_selectable(berta_unit));
}

#[test]
fn test_same_seed_same_deployment() {
    let a = skirmish(123);
    let b = skirmish(123);

    let pos_a: Vec<GridPos> = a.battle().unwrap().all_units().map(|u| u.position).collect();
    let pos_b: Vec<GridPos> = b.battle().unwrap().all_units().map(|u| u.position).collect();
    assert_eq!(pos_a, pos_b);
}

/// One Manhattan step (or several, up to `budget`) from `from` toward `to`,
/// stopping one cell short of stacking
fn step_toward(from: GridPos, to: GridPos, budget: u32) -> GridPos {
    let mut pos = from;
    for _ in 0..budget {
        if pos.chebyshev_distance(&to) <= 1 {
            break;
        }
        if pos.x < to.x {
            pos.x += 1;
        } else if pos.x > to.x {
            pos.x -= 1;
        } else if pos.y < to.y {
            pos.y += 1;
        } else if pos.y > to.y {
            pos.y -= 1;
        }
    }
    pos
}
