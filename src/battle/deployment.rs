//! Deployment placement - scattering rosters onto the grid
//!
//! Rejection sampling against an occupied-cell set: draw uniform cells until
//! a free one turns up, with a hard per-unit retry budget. Units are placed
//! in player order then roster order, so earlier units win priority on a
//! crowded grid.

use ahash::AHashSet;
use rand::Rng;

use crate::battle::units::Player;
use crate::core::error::{CrownError, Result};
use crate::core::types::GridPos;

/// Scatter every unit of every player onto a `map_size` x `map_size` grid
///
/// Each unit lands on a cell no other unit occupies, and its `action_marks`
/// counter is reset for the encounter. Fails with
/// [`CrownError::DeploymentFailed`] if `max_tries` consecutive draws for one
/// unit all collide - that is a caller misconfiguration (grid too small for
/// the roster), not a game situation.
pub fn place_units(
    players: &mut [Player],
    map_size: u32,
    max_tries: u32,
    rng: &mut impl Rng,
) -> Result<()> {
    let mut occupied: AHashSet<GridPos> = AHashSet::new();

    for player in players.iter_mut() {
        for unit in player.units.iter_mut() {
            let position = draw_free_cell(&mut occupied, map_size, max_tries, rng)
                .ok_or(CrownError::DeploymentFailed {
                    unit: unit.id,
                    tries: max_tries,
                })?;

            unit.position = position;
            unit.action_marks = 0;
        }
    }

    Ok(())
}

/// Draw a uniform cell not yet in `occupied`, claiming it on success
fn draw_free_cell(
    occupied: &mut AHashSet<GridPos>,
    map_size: u32,
    max_tries: u32,
    rng: &mut impl Rng,
) -> Option<GridPos> {
    for _ in 0..max_tries {
        let candidate = GridPos::new(rng.gen_range(0..map_size), rng.gen_range(0..map_size));
        if occupied.insert(candidate) {
            return Some(candidate);
        }
    }
    None
}
