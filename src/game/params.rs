//! Game Parameters
//!
//! Per-game configuration consumed read-only from the game-configuration
//! collaborator. Thresholds and rounds are always passed in explicitly;
//! there are no module-level defaults hiding inside the derivation code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::coords::Coordinate;

/// Fixed-point scale for `game_speed`: 10_000 = 1.0x.
///
/// A protocol constant owned by the remote system. All economy formulas
/// multiply or divide by this exact value with truncating division.
pub const GAME_SPEED_ONE: u64 = 10_000;

/// Noise thresholds driving body generation.
///
/// Ten ordered byte thresholds, compared against bytes of the property hash.
/// The ladder fields must be ascending for generation to be meaningful; the
/// derivation itself never reorders them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseThresholds {
    /// Byte 0 below this is dead space.
    pub dead_space_threshold: u8,
    /// Byte 1 below this is a Planet.
    pub planet_threshold: u8,
    /// Byte 1 below this (and >= planet) is a Quasar.
    pub quasar_threshold: u8,
    /// Byte 1 below this (and >= quasar) is a Spacetime Rip.
    pub spacetime_rip_threshold: u8,
    /// Remainder of the byte 1 range: Asteroid Belt.
    pub asteroid_belt_threshold: u8,
    /// Size ladder over byte 2: below this is size 1.
    pub size_threshold_1: u8,
    /// Below this is size 2.
    pub size_threshold_2: u8,
    /// Below this is size 3.
    pub size_threshold_3: u8,
    /// Below this is size 4.
    pub size_threshold_4: u8,
    /// Below this is size 5; at or above, size 6.
    pub size_threshold_5: u8,
}

impl Default for NoiseThresholds {
    /// Standard tuning: ~1.2% of coordinates hold a body, planets common,
    /// rips rare, sizes front-loaded toward small.
    fn default() -> Self {
        Self {
            dead_space_threshold: 253,
            planet_threshold: 160,
            quasar_threshold: 200,
            spacetime_rip_threshold: 216,
            asteroid_belt_threshold: 255,
            size_threshold_1: 116,
            size_threshold_2: 180,
            size_threshold_3: 220,
            size_threshold_4: 244,
            size_threshold_5: 252,
        }
    }
}

/// Parameters of one game instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameParameters {
    /// Game identifier, part of every hash input.
    pub game_id: u64,
    /// Generation thresholds.
    pub thresholds: NoiseThresholds,
    /// Iterated-hash difficulty, >= 1.
    pub hash_rounds: u32,
    /// Side length of the playable square, centered on the origin.
    pub map_diameter: u64,
    /// Game speed, fixed-point with [`GAME_SPEED_ONE`] = 1.0x.
    pub game_speed: u64,
}

impl GameParameters {
    /// Create parameters with default thresholds.
    pub fn new(game_id: u64, hash_rounds: u32, map_diameter: u64, game_speed: u64) -> Self {
        Self {
            game_id,
            thresholds: NoiseThresholds::default(),
            hash_rounds,
            map_diameter,
            game_speed,
        }
    }

    /// Validate caller-supplied values. Fail fast; never retried.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.hash_rounds == 0 {
            return Err(ParamError::InvalidRounds);
        }
        if self.map_diameter == 0 {
            return Err(ParamError::InvalidMapDiameter);
        }
        if self.game_speed == 0 {
            return Err(ParamError::InvalidGameSpeed);
        }
        Ok(())
    }

    /// Half of the map diameter, as a signed offset from the origin.
    #[inline]
    pub fn half_extent(&self) -> i64 {
        (self.map_diameter / 2) as i64
    }

    /// Whether a coordinate lies within map bounds (inclusive on both edges).
    #[inline]
    pub fn contains(&self, coord: Coordinate) -> bool {
        let half = self.half_extent();
        coord.x >= -half && coord.x <= half && coord.y >= -half && coord.y <= half
    }
}

/// Malformed caller input. Indicates a caller bug; fail fast, never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Hash rounds must be at least 1.
    #[error("hash rounds must be at least 1")]
    InvalidRounds,
    /// Map diameter must be positive.
    #[error("map diameter must be positive")]
    InvalidMapDiameter,
    /// Game speed must be positive.
    #[error("game speed must be positive")]
    InvalidGameSpeed,
    /// Scan region has no coordinates.
    #[error("scan region is empty")]
    EmptyRegion,
    /// Only Planet-type bodies can be upgraded.
    #[error("only Planet-type bodies can be upgraded")]
    NotUpgradable,
    /// Not enough metal for the requested upgrade.
    #[error("insufficient metal: have {have}, need {need}")]
    InsufficientMetal {
        /// Metal currently available.
        have: u64,
        /// Metal the upgrade costs.
        need: u64,
    },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_defaults() {
        let params = GameParameters::new(1, 1, 1000, GAME_SPEED_ONE);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let good = GameParameters::new(1, 1, 1000, GAME_SPEED_ONE);

        let mut p = good;
        p.hash_rounds = 0;
        assert_eq!(p.validate(), Err(ParamError::InvalidRounds));

        let mut p = good;
        p.map_diameter = 0;
        assert_eq!(p.validate(), Err(ParamError::InvalidMapDiameter));

        let mut p = good;
        p.game_speed = 0;
        assert_eq!(p.validate(), Err(ParamError::InvalidGameSpeed));
    }

    #[test]
    fn test_bounds_inclusive() {
        let params = GameParameters::new(1, 1, 100, GAME_SPEED_ONE);
        assert_eq!(params.half_extent(), 50);

        assert!(params.contains(Coordinate::new(50, -50)));
        assert!(params.contains(Coordinate::ORIGIN));
        assert!(!params.contains(Coordinate::new(51, 0)));
        assert!(!params.contains(Coordinate::new(0, -51)));
    }

    #[test]
    fn test_odd_diameter_truncates() {
        let params = GameParameters::new(1, 1, 101, GAME_SPEED_ONE);
        assert_eq!(params.half_extent(), 50);
    }
}
