//! Crownfield - Demo Loop
//!
//! A minimal command loop for exercising the battle engine by hand: starts a
//! two-commander skirmish, then lets you bid, move, attack, and advance
//! turns from stdin. The real game drives the engine from its UI; this
//! binary exists for kicking the tires.

use crownfield::battle::{
    Attributes, BattleEngine, BattleUnit, Player, Terrain, TerrainKind, UnitKind,
};
use crownfield::core::config::BattleConfig;
use crownfield::core::error::Result;
use crownfield::core::types::{PlayerId, UnitId};

use std::io::{self, Write};

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("crownfield=debug")
        .init();

    let seed = std::env::var("CROWNFIELD_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    tracing::info!(seed, "Crownfield demo starting...");

    let mut engine = BattleEngine::new(BattleConfig {
        seed,
        ..Default::default()
    })?;

    engine.start_battle(
        Terrain::new(TerrainKind::Plains, (12, 4)),
        vec![
            Player::new(PlayerId(1), "Aldric", demo_roster("Aldric")),
            Player::new(PlayerId(2), "Berta", demo_roster("Berta")),
        ],
    )?;

    println!("\n=== CROWNFIELD ===");
    println!("A two-commander skirmish on a 10x10 field");
    println!();
    println!("Commands:");
    println!("  units             - list units with their index, position, hp");
    println!("  bid <player> <n>  - declare a supply bid (1 or 2)");
    println!("  move <u> <x> <y>  - move unit by index");
    println!("  attack <u> <v>    - attack unit v with unit u");
    println!("  next / n          - advance to the next turn slice");
    println!("  dump              - print the session as JSON");
    println!("  end               - end the battle");
    println!("  quit / q          - exit");
    println!();

    loop {
        display_status(&engine);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["units"] => list_units(&engine),
            ["bid", player, amount] => {
                let (Ok(player), Ok(amount)) = (player.parse::<u32>(), amount.parse::<u32>())
                else {
                    println!("usage: bid <player> <amount>");
                    continue;
                };
                if engine.declare_supply(PlayerId(player), amount) {
                    println!("bid accepted");
                } else {
                    println!("bid rejected: must raise your previous bid");
                }
            }
            ["move", unit, x, y] => {
                let (Some(id), Ok(x), Ok(y)) =
                    (unit_by_index(&engine, unit), x.parse::<u32>(), y.parse::<u32>())
                else {
                    println!("usage: move <unit-index> <x> <y>");
                    continue;
                };
                engine.update_unit_position(id, x, y);
            }
            ["attack", attacker, target] => {
                let (Some(attacker), Some(target)) = (
                    unit_by_index(&engine, attacker),
                    unit_by_index(&engine, target),
                ) else {
                    println!("usage: attack <attacker-index> <target-index>");
                    continue;
                };
                match engine.attack(attacker, target) {
                    Some(outcome) => {
                        println!("rolled {:?} -> {} hits", outcome.rolls, outcome.hits)
                    }
                    None => println!("attack refused (spent action, out of reach, or friendly)"),
                }
            }
            ["next"] | ["n"] => engine.next_turn(),
            ["dump"] => {
                if let Some(battle) = engine.battle() {
                    println!("{}", serde_json::to_string_pretty(battle)?);
                }
            }
            ["end"] => {
                if engine.end_battle().is_some() {
                    println!("battle ended");
                    break;
                }
            }
            _ => println!("unknown command: {input}"),
        }
    }

    tracing::info!("Crownfield demo shutting down");
    Ok(())
}

/// A small mixed roster for one commander
fn demo_roster(owner: &str) -> Vec<BattleUnit> {
    vec![
        BattleUnit::new(
            format!("{owner}'s regent"),
            UnitKind::Regent,
            Attributes {
                combat: 12,
                accuracy: 8,
                focus: 6,
                armor: 4,
                vitality: 12,
            },
        ),
        BattleUnit::new(
            format!("{owner}'s champion"),
            UnitKind::Hero,
            Attributes {
                combat: 10,
                accuracy: 6,
                focus: 4,
                armor: 3,
                vitality: 9,
            },
        ),
        BattleUnit::new(
            format!("{owner}'s levy"),
            UnitKind::Troop,
            Attributes {
                combat: 8,
                accuracy: 4,
                focus: 2,
                armor: 2,
                vitality: 5,
            },
        ),
    ]
}

fn display_status(engine: &BattleEngine) {
    let Some(battle) = engine.battle() else {
        return;
    };
    let state = engine.turn_state();
    let current = state
        .current_player()
        .and_then(|id| battle.players.iter().find(|p| p.id == id))
        .map(|p| p.name.as_str())
        .unwrap_or("-");

    println!(
        "\nturn slice: {current} | order: {:?} | bids: {:?}",
        state.action_order, state.declared_supplies
    );
}

fn list_units(engine: &BattleEngine) {
    let Some(battle) = engine.battle() else {
        return;
    };
    let state = engine.turn_state();
    for (i, unit) in battle.all_units().enumerate() {
        let owner = battle.owner_of(unit.id).map(|p| p.0).unwrap_or(0);
        println!(
            "[{i}] p{owner} {:10} {:?} at ({},{}) hp {}/{} marks {}/{} move {}",
            unit.name,
            unit.kind,
            unit.position.x,
            unit.position.y,
            unit.current_hp,
            unit.attributes.vitality,
            unit.action_marks,
            unit.kind.max_marks(),
            state.movement_left(unit.id),
        );
    }
}

fn unit_by_index(engine: &BattleEngine, index: &str) -> Option<UnitId> {
    let index: usize = index.parse().ok()?;
    engine.battle()?.all_units().nth(index).map(|u| u.id)
}
