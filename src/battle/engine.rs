//! Encounter lifecycle and the operations that mutate it
//!
//! The engine owns the live session and its turn state outright; callers see
//! consistent snapshots through the read accessors and mutate only through
//! the operations here. Every operation is synchronous and commits whole -
//! the reference UI staggers attack visuals with a delay, but that is a
//! presentation concern, not an engine one.
//!
//! Invalid requests (a bid that does not raise, moving a unit while another
//! holds the slice, attacking out of reach) are silent no-ops: the UI has
//! already filtered them, and the engine check is the backstop, not a
//! user-facing error channel. The only hard failures are environment
//! violations at battle start.

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::battle::auction::{accept_bid, all_players_bid, compute_order};
use crate::battle::deployment::place_units;
use crate::battle::dice::{is_adjacent, roll_test, RollOutcome};
use crate::battle::terrain::Terrain;
use crate::battle::turn::TurnState;
use crate::battle::units::{BattleUnit, Player};
use crate::core::config::BattleConfig;
use crate::core::error::{CrownError, Result};
use crate::core::types::{GridPos, PlayerId, UnitId};
use serde::{Deserialize, Serialize};

/// One active combat encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleSession {
    pub terrain: Terrain,
    pub map_size: u32,
    pub players: Vec<Player>,
}

impl BattleSession {
    pub fn get_unit(&self, unit_id: UnitId) -> Option<&BattleUnit> {
        self.players.iter().find_map(|p| p.get_unit(unit_id))
    }

    pub fn get_unit_mut(&mut self, unit_id: UnitId) -> Option<&mut BattleUnit> {
        self.players.iter_mut().find_map(|p| p.get_unit_mut(unit_id))
    }

    /// Which player commands this unit?
    pub fn owner_of(&self, unit_id: UnitId) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.get_unit(unit_id).is_some())
            .map(|p| p.id)
    }

    pub fn all_units(&self) -> impl Iterator<Item = &BattleUnit> {
        self.players.iter().flat_map(|p| p.units.iter())
    }

    pub fn unit_count(&self) -> usize {
        self.players.iter().map(|p| p.units.len()).sum()
    }
}

/// The tactical battle engine
///
/// Holds at most one live [`BattleSession`] plus its [`TurnState`], the
/// encounter RNG, and the caller-facing "selected unit" reference that
/// movement keeps fresh.
#[derive(Debug)]
pub struct BattleEngine {
    config: BattleConfig,
    rng: ChaCha8Rng,
    battle: Option<BattleSession>,
    turn_state: TurnState,
    selected_unit: Option<UnitId>,
}

impl BattleEngine {
    pub fn new(config: BattleConfig) -> Result<Self> {
        config.validate().map_err(CrownError::InvalidConfig)?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            rng,
            battle: None,
            turn_state: TurnState::new(),
            selected_unit: None,
        })
    }

    // === Lifecycle ===

    /// Start an encounter: deploy the rosters and seed the turn state
    ///
    /// Turn order starts as the given player sequence; the auction replaces
    /// it once every player has bid. Movement budgets come from each unit's
    /// `accuracy` immediately, so the first player can move before bidding
    /// settles. A live session, if any, is replaced.
    pub fn start_battle(&mut self, terrain: Terrain, mut players: Vec<Player>) -> Result<()> {
        let unit_count: usize = players.iter().map(|p| p.units.len()).sum();
        let map_size = self.config.map_size;
        if (map_size as usize).pow(2) < unit_count {
            return Err(CrownError::GridTooSmall {
                map_size,
                unit_count,
            });
        }

        place_units(
            &mut players,
            map_size,
            self.config.placement_max_tries,
            &mut self.rng,
        )?;

        let player_ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        let session = BattleSession {
            terrain,
            map_size,
            players,
        };

        tracing::info!(
            players = player_ids.len(),
            units = unit_count,
            map_size,
            "battle started"
        );

        self.turn_state = TurnState::seed(player_ids, movement_budgets(&session));
        self.battle = Some(session);
        self.selected_unit = None;
        Ok(())
    }

    /// Tear the encounter down
    ///
    /// No-op without a live session. Otherwise zeroes every surviving
    /// unit's action marks, clears the turn state wholesale, drops the
    /// selection, and hands the final session back so the caller can
    /// project results onto the roster.
    pub fn end_battle(&mut self) -> Option<BattleSession> {
        let mut session = self.battle.take()?;
        for player in session.players.iter_mut() {
            for unit in player.units.iter_mut() {
                unit.action_marks = 0;
            }
        }
        self.turn_state = TurnState::new();
        self.selected_unit = None;
        tracing::info!("battle ended");
        Some(session)
    }

    // === Initiative auction ===

    /// Record a supply bid; returns whether it was accepted
    ///
    /// A bid must strictly exceed the player's last accepted bid or it is
    /// silently dropped. Every accepted bid re-derives the turn order once
    /// the table is full, so raising after the first full set reshuffles
    /// initiative rather than being ignored.
    pub fn declare_supply(&mut self, player: PlayerId, amount: u32) -> bool {
        if !accept_bid(&mut self.turn_state.declared_supplies, player, amount) {
            tracing::debug!(%player, amount, "supply bid rejected (must raise)");
            return false;
        }
        tracing::info!(%player, amount, "supply bid accepted");

        if let Some(battle) = &self.battle {
            let declared: Vec<PlayerId> = battle.players.iter().map(|p| p.id).collect();
            if all_players_bid(&self.turn_state.declared_supplies, &declared) {
                self.turn_state.action_order =
                    compute_order(&self.turn_state.declared_supplies, &declared);
                tracing::info!(order = ?self.turn_state.action_order, "turn order derived");
            }
        }
        true
    }

    // === Turn state machine ===

    /// Hand the slice to the next player in the auction order
    ///
    /// Resets the entire encounter's per-unit bookkeeping: every unit's
    /// movement budget is refilled from its current `accuracy`, and the
    /// acted set, action flags, and slice lock all clear.
    pub fn next_turn(&mut self) {
        let Some(battle) = &self.battle else {
            return;
        };
        self.turn_state.advance(movement_budgets(battle));
        tracing::debug!(
            current_turn = self.turn_state.current_turn,
            player = ?self.turn_state.current_player(),
            "turn advanced"
        );
    }

    /// Move a unit, spending Manhattan-distance movement
    ///
    /// Silent no-op unless the unit exists, belongs to the player whose
    /// slice it is, holds (or can claim) the slice lock, can afford the
    /// distance, and has action marks left. The first move in a slice
    /// consumes a mark; further moves by the same unit in the same slice
    /// only spend distance.
    pub fn update_unit_position(&mut self, unit_id: UnitId, x: u32, y: u32) {
        let Some(battle) = &mut self.battle else {
            return;
        };
        if !self.turn_state.slice_lock.permits(unit_id) {
            return;
        }
        if battle.owner_of(unit_id) != self.turn_state.current_player() {
            return;
        }
        let Some(unit) = battle.get_unit_mut(unit_id) else {
            return;
        };

        let target = GridPos::new(x, y);
        let cost = unit.position.manhattan_distance(&target);
        let remaining = self.turn_state.movement_left(unit_id);
        if cost > remaining {
            return;
        }
        if unit.marks_exhausted() {
            return;
        }

        let already_acted = self.turn_state.acted_unit_ids.contains(&unit_id);
        unit.position = target;
        if !already_acted {
            unit.action_marks += 1;
        }

        self.turn_state
            .unit_movement_left
            .insert(unit_id, remaining - cost);
        self.turn_state.acted_unit_ids.insert(unit_id);
        self.turn_state.slice_lock.claim(unit_id);
        self.selected_unit = Some(unit_id);

        tracing::debug!(unit = %unit_id, x, y, cost, left = remaining - cost, "unit moved");
    }

    // === Combat ===

    /// Resolve an attack: dice pool from the attacker's `combat`, hits
    /// applied to the target as damage
    ///
    /// Silent no-op (returns `None`) unless the attacker still has its
    /// once-per-slice action, holds or can claim the slice lock, and the
    /// target is an adjacent enemy. On success the attacker's action flag
    /// is spent and it becomes the slice's active unit.
    pub fn attack(&mut self, attacker_id: UnitId, target_id: UnitId) -> Option<RollOutcome> {
        let battle = self.battle.as_mut()?;
        if !self.turn_state.slice_lock.permits(attacker_id) {
            return None;
        }
        if self.turn_state.action_used(attacker_id) {
            return None;
        }

        let attacker_owner = battle.owner_of(attacker_id)?;
        let target_owner = battle.owner_of(target_id)?;
        if attacker_owner == target_owner {
            return None;
        }

        let attacker_pos = battle.get_unit(attacker_id)?.position;
        let combat = battle.get_unit(attacker_id)?.attributes.combat;
        let target = battle.get_unit_mut(target_id)?;
        if !is_adjacent(attacker_pos, target.position) {
            return None;
        }

        let outcome = roll_test(combat, self.config.challenge_difficulty, &mut self.rng);
        target.apply_damage(outcome.hits);

        tracing::info!(
            attacker = %attacker_id,
            target = %target_id,
            hits = outcome.hits,
            rolls = ?outcome.rolls,
            target_hp = target.current_hp,
            "attack resolved"
        );

        self.turn_state.unit_action_used.insert(attacker_id);
        self.turn_state.slice_lock.claim(attacker_id);
        Some(outcome)
    }

    /// Spend a unit's once-per-slice action without an attack
    ///
    /// The explicit marker for abilities resolved outside the engine; also
    /// claims the slice lock if nobody holds it.
    pub fn mark_unit_acted_this_turn(&mut self, unit_id: UnitId) {
        self.turn_state.unit_action_used.insert(unit_id);
        self.turn_state.slice_lock.claim(unit_id);
    }

    /// Apply raw damage to a unit, saturating at zero hit points
    ///
    /// Zero-HP units stay on the grid; no death rule lives in this layer.
    pub fn apply_damage_to_unit(&mut self, unit_id: UnitId, amount: u32) {
        let Some(battle) = &mut self.battle else {
            return;
        };
        if let Some(unit) = battle.get_unit_mut(unit_id) {
            unit.apply_damage(amount);
            tracing::debug!(unit = %unit_id, amount, hp = unit.current_hp, "damage applied");
        }
    }

    // === Read accessors ===

    pub fn battle(&self) -> Option<&BattleSession> {
        self.battle.as_ref()
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.turn_state
    }

    pub fn selected_unit(&self) -> Option<&BattleUnit> {
        let battle = self.battle.as_ref()?;
        battle.get_unit(self.selected_unit?)
    }

    pub fn set_selected_unit(&mut self, unit_id: Option<UnitId>) {
        self.selected_unit = unit_id;
    }

    /// May this unit be picked to act right now?
    pub fn is_selectable(&self, unit_id: UnitId) -> bool {
        let Some(battle) = &self.battle else {
            return false;
        };
        let Some(owner) = battle.owner_of(unit_id) else {
            return false;
        };
        let Some(unit) = battle.get_unit(unit_id) else {
            return false;
        };
        self.turn_state.is_selectable(owner, unit)
    }
}

/// Refill map: every deployed unit's movement budget from its `accuracy`
fn movement_budgets(session: &BattleSession) -> AHashMap<UnitId, u32> {
    session
        .all_units()
        .map(|u| (u.id, u.attributes.accuracy))
        .collect()
}
