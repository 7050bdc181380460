//! Tactical battle engine
//!
//! One encounter at a time: rosters deploy onto a square grid, players bid
//! supply for initiative, then alternate turn slices in which exactly one
//! unit may move and strike. Resolution is a d6 dice pool sized by the
//! acting attribute.
//!
//! Everything here is single-threaded cooperative mutation: each operation
//! on [`BattleEngine`] commits atomically, and outside readers only ever see
//! post-operation snapshots.

pub mod auction;
pub mod constants;
pub mod deployment;
pub mod dice;
pub mod engine;
pub mod terrain;
pub mod turn;
pub mod units;

// Re-exports for convenient access
pub use auction::{accept_bid, all_players_bid, compute_order};
pub use constants::*;
pub use deployment::place_units;
pub use dice::{is_adjacent, roll_test, score_rolls, RollOutcome};
pub use engine::{BattleEngine, BattleSession};
pub use terrain::{Terrain, TerrainKind};
pub use turn::{SliceLock, TurnState};
pub use units::{Attributes, BattleUnit, Player, UnitKind};
