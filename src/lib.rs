//! Crownfield - Tactical Battle Engine
//!
//! Governs a single combat encounter between commanders: deployment onto a
//! bounded grid, the supply auction that decides initiative, per-unit
//! movement and action budgeting, and dice-pool combat resolution.
//!
//! The overworld map, the kingdom economy, and all presentation live in the
//! surrounding game; this crate owns only the encounter state and its rules.

pub mod battle;
pub mod core;
