//! Battle configuration with documented constants
//!
//! The embedding game constructs one of these per encounter; the defaults
//! match the standard skirmish ruleset.

/// Configuration for a battle encounter
#[derive(Debug, Clone)]
pub struct BattleConfig {
    /// Side length of the square battle grid (cells)
    ///
    /// Deployment requires `map_size * map_size >= total unit count`;
    /// `validate()` cannot check that (it depends on the rosters), but
    /// `start_battle` does.
    pub map_size: u32,

    /// How many random draws deployment may spend per unit before giving up
    ///
    /// Exhausting this budget is a caller misconfiguration (grid too small
    /// for the unit count) and surfaces as a fatal error.
    pub placement_max_tries: u32,

    /// Challenge difficulty for dice pools: a die showing this value or
    /// higher counts as a hit
    pub challenge_difficulty: u8,

    /// Seed for the encounter's RNG (deployment draws and dice pools)
    ///
    /// Two encounters with the same seed, rosters, and action sequence play
    /// out identically.
    pub seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            map_size: crate::battle::constants::DEFAULT_MAP_SIZE,
            placement_max_tries: crate::battle::constants::PLACEMENT_MAX_TRIES,
            challenge_difficulty: crate::battle::constants::DEFAULT_CHALLENGE_DIFFICULTY,
            seed: 0,
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.map_size == 0 {
            return Err("map_size must be at least 1".into());
        }

        if self.placement_max_tries == 0 {
            return Err("placement_max_tries must be at least 1".into());
        }

        // A difficulty above 6 makes every non-1 die a blank
        if self.challenge_difficulty < 2 || self.challenge_difficulty > 6 {
            return Err(format!(
                "challenge_difficulty ({}) must be within 2..=6",
                self.challenge_difficulty
            ));
        }

        Ok(())
    }
}
