//! Battle system constants - all tunable values in one place

// Grid
pub const DEFAULT_MAP_SIZE: u32 = 10;

// Deployment rejection sampling: draws allowed per unit before the grid is
// judged too small for the roster
pub const PLACEMENT_MAX_TRIES: u32 = 1000;

// Dice pools
pub const DICE_SIDES: u8 = 6;
pub const DEFAULT_CHALLENGE_DIFFICULTY: u8 = 4;
/// Attribute points per die in a pool: `combat 8` rolls two dice
pub const ATTRIBUTE_POINTS_PER_DIE: u32 = 4;

// Action marks per unit kind: how many action-consuming events a unit may
// perform across the encounter before it stops being selectable
pub const TROOP_MAX_MARKS: u32 = 1;
pub const HERO_MAX_MARKS: u32 = 2;
pub const REGENT_MAX_MARKS: u32 = 3;
