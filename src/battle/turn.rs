//! Turn and round bookkeeping
//!
//! One player acts at a time in auction order, and within that slice exactly
//! one unit may act. Advancing the turn resets the whole encounter's
//! per-unit bookkeeping - every unit's movement budget and action flag, not
//! just the incoming player's. That global reset is the ruleset as played;
//! do not narrow it to the active player.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::battle::units::BattleUnit;
use crate::core::types::{PlayerId, UnitId};

/// The single-active-unit lock for the current turn slice
///
/// Tagged rather than nullable so "switch active unit mid-slice" is not a
/// representable transition: once `Locked`, the holder stays until the next
/// turn advance rebuilds the slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliceLock {
    #[default]
    Open,
    Locked(UnitId),
}

impl SliceLock {
    /// May `unit` act under this lock?
    pub fn permits(&self, unit: UnitId) -> bool {
        match self {
            SliceLock::Open => true,
            SliceLock::Locked(holder) => *holder == unit,
        }
    }

    /// Claim the slice for `unit` if nobody holds it yet
    pub fn claim(&mut self, unit: UnitId) {
        if matches!(self, SliceLock::Open) {
            *self = SliceLock::Locked(unit);
        }
    }

    pub fn holder(&self) -> Option<UnitId> {
        match self {
            SliceLock::Open => None,
            SliceLock::Locked(holder) => Some(*holder),
        }
    }
}

/// Mutable per-encounter turn state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnState {
    /// Last accepted supply bid per player (only ever raised)
    pub declared_supplies: AHashMap<PlayerId, u32>,
    /// Turn order; seeded with the raw player sequence at deployment and
    /// re-derived by the auction once every player has bid
    pub action_order: Vec<PlayerId>,
    /// Index into `action_order` of the player whose slice it is
    pub current_turn: usize,
    /// Units that have consumed an action mark this slice
    pub acted_unit_ids: AHashSet<UnitId>,
    /// Remaining movement budget per unit, refilled from `accuracy` on every
    /// turn advance
    pub unit_movement_left: AHashMap<UnitId, u32>,
    /// Units whose once-per-slice action (attack) is spent
    pub unit_action_used: AHashSet<UnitId>,
    /// The one unit allowed to act this slice
    pub slice_lock: SliceLock,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed state for a fresh encounter
    ///
    /// Turn order starts as the raw player sequence (the auction has not
    /// run), and movement budgets are pre-populated so the first slice can
    /// move even before bids resolve.
    pub fn seed(player_ids: Vec<PlayerId>, movement: AHashMap<UnitId, u32>) -> Self {
        Self {
            declared_supplies: AHashMap::new(),
            action_order: player_ids,
            current_turn: 0,
            acted_unit_ids: AHashSet::new(),
            unit_movement_left: movement,
            unit_action_used: AHashSet::new(),
            slice_lock: SliceLock::Open,
        }
    }

    /// The player whose slice it currently is
    pub fn current_player(&self) -> Option<PlayerId> {
        self.action_order.get(self.current_turn).copied()
    }

    /// Remaining movement for a unit (0 if unknown)
    pub fn movement_left(&self, unit: UnitId) -> u32 {
        self.unit_movement_left.get(&unit).copied().unwrap_or(0)
    }

    /// Has this unit spent its once-per-slice action?
    pub fn action_used(&self, unit: UnitId) -> bool {
        self.unit_action_used.contains(&unit)
    }

    /// Advance to the next slice and reset the whole encounter's per-unit
    /// bookkeeping
    ///
    /// `movement` is the refilled budget map, recomputed by the caller from
    /// every unit's current `accuracy`.
    pub fn advance(&mut self, movement: AHashMap<UnitId, u32>) {
        if self.action_order.is_empty() {
            return;
        }
        self.current_turn = (self.current_turn + 1) % self.action_order.len();
        self.acted_unit_ids.clear();
        self.unit_movement_left = movement;
        self.unit_action_used.clear();
        self.slice_lock = SliceLock::Open;
    }

    /// May the owner of `unit` pick it to act this slice?
    ///
    /// True iff the unit belongs to the player whose slice it is, has not
    /// already acted this slice, and still has action marks left.
    pub fn is_selectable(&self, owner: PlayerId, unit: &BattleUnit) -> bool {
        self.current_player() == Some(owner)
            && !self.acted_unit_ids.contains(&unit.id)
            && !unit.marks_exhausted()
    }
}
