//! Units and the players who command them
//!
//! A battle unit is a projection of a roster unit onto the grid: the roster
//! keeps levels, spells, and equipment; the encounter only needs attributes,
//! hit points, a position, and the action-mark counter.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{HERO_MAX_MARKS, REGENT_MAX_MARKS, TROOP_MAX_MARKS};
use crate::core::types::{GridPos, PlayerId, UnitId};

/// Rank of a unit, which bounds how many actions it may take per encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Troop,
    Hero,
    Regent,
}

impl UnitKind {
    /// Cap on `action_marks` for this rank
    pub fn max_marks(&self) -> u32 {
        match self {
            UnitKind::Troop => TROOP_MAX_MARKS,
            UnitKind::Hero => HERO_MAX_MARKS,
            UnitKind::Regent => REGENT_MAX_MARKS,
        }
    }
}

/// Combat-relevant attributes
///
/// `accuracy` doubles as the per-turn movement budget; `combat` sizes the
/// attack dice pool; `vitality` is maximum hit points. `focus` and `armor`
/// are carried for the roster but not consulted by the core resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub combat: u32,
    pub accuracy: u32,
    pub focus: u32,
    pub armor: u32,
    pub vitality: u32,
}

/// A unit deployed in an encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleUnit {
    pub id: UnitId,
    pub name: String,
    pub kind: UnitKind,
    pub attributes: Attributes,
    pub current_hp: u32,
    pub position: GridPos,
    pub action_marks: u32,
    /// Opaque art reference, passed through for presentation
    pub image: String,
}

impl BattleUnit {
    pub fn new(name: impl Into<String>, kind: UnitKind, attributes: Attributes) -> Self {
        Self {
            id: UnitId::new(),
            name: name.into(),
            kind,
            attributes,
            current_hp: attributes.vitality,
            position: GridPos::default(),
            action_marks: 0,
            image: String::new(),
        }
    }

    /// Apply damage, saturating at zero hit points
    ///
    /// No death rule lives here: a unit at 0 HP stays on the grid.
    pub fn apply_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Has this unit spent all the action marks its rank allows?
    pub fn marks_exhausted(&self) -> bool {
        self.action_marks >= self.kind.max_marks()
    }
}

/// A commander and the units they brought to the encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub units: Vec<BattleUnit>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, units: Vec<BattleUnit>) -> Self {
        Self {
            id,
            name: name.into(),
            units,
        }
    }

    pub fn get_unit(&self, unit_id: UnitId) -> Option<&BattleUnit> {
        self.units.iter().find(|u| u.id == unit_id)
    }

    pub fn get_unit_mut(&mut self, unit_id: UnitId) -> Option<&mut BattleUnit> {
        self.units.iter_mut().find(|u| u.id == unit_id)
    }
}
