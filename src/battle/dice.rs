//! Dice-pool resolution and adjacency
//!
//! Attributes convert to d6 pools at one die per 4 points. Each die at or
//! above the challenge difficulty scores a hit, each 1 cancels one, and the
//! net can never go negative.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::battle::constants::{ATTRIBUTE_POINTS_PER_DIE, DICE_SIDES};
use crate::core::types::GridPos;

/// Outcome of a dice pool
///
/// `rolls` keeps the individual die faces so the caller can show them; only
/// `hits` carries game meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub hits: u32,
    pub rolls: Vec<u8>,
}

/// Roll the dice pool for an attribute value against a challenge difficulty
///
/// `attribute_value / 4` dice are drawn; an attribute below 4 rolls nothing
/// and scores zero hits.
pub fn roll_test(attribute_value: u32, challenge_difficulty: u8, rng: &mut impl Rng) -> RollOutcome {
    let dice_count = attribute_value / ATTRIBUTE_POINTS_PER_DIE;

    let rolls: Vec<u8> = (0..dice_count)
        .map(|_| rng.gen_range(1..=DICE_SIDES))
        .collect();

    score_rolls(&rolls, challenge_difficulty)
}

/// Score an already-drawn set of die faces
///
/// Split out so tests can feed exact sequences without an RNG.
pub fn score_rolls(rolls: &[u8], challenge_difficulty: u8) -> RollOutcome {
    let net: i32 = rolls
        .iter()
        .map(|&face| {
            if face == 1 {
                -1
            } else if face >= challenge_difficulty {
                1
            } else {
                0
            }
        })
        .sum();

    RollOutcome {
        hits: net.max(0) as u32,
        rolls: rolls.to_vec(),
    }
}

/// Are two cells within striking range of each other?
///
/// 8-neighborhood: both deltas in {-1, 0, 1}, and not the same cell.
pub fn is_adjacent(a: GridPos, b: GridPos) -> bool {
    a.chebyshev_distance(&b) == 1
}
