//! Discovered Body State
//!
//! Assembles the full public picture of an initialized location and projects
//! its time-varying state forward. The encrypted-state collaborator owns
//! reading and writing these values; this module only computes them.

use serde::{Deserialize, Serialize};

use crate::core::hash::CommitmentHash;
use crate::game::body::{CelestialBodyProperties, CelestialBodyType};
use crate::game::economy::{lazy_accrue, upgrade_cost};
use crate::game::params::ParamError;
use crate::game::stats::{apply_comets, base_stats, CelestialBodyStats};

/// Time-varying public state of an initialized location.
///
/// Advanced only by explicit projection - nothing in this core runs a clock.
/// Native (unclaimed) populations do not regenerate; callers project a body
/// only once it is claimed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicState {
    /// Ships currently stationed.
    pub ship_count: u64,
    /// Metal currently stockpiled.
    pub metal_count: u64,
    /// Slot of the last projection.
    pub last_updated_slot: u64,
}

/// Upgrade focus chosen by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeFocus {
    /// Double range.
    Range,
    /// Double launch velocity.
    LaunchVelocity,
}

/// A discovered, initialized celestial body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelestialBody {
    /// Discovery proof for the body's coordinate.
    pub commitment: CommitmentHash,
    /// Generated properties.
    pub properties: CelestialBodyProperties,
    /// Boosted stats (base stats with comets applied).
    pub stats: CelestialBodyStats,
    /// Upgrade level, starting at 1.
    pub level: u8,
    /// Time-varying state.
    pub state: DynamicState,
}

impl CelestialBody {
    /// Initialize a body exactly as the on-chain create-planet path does:
    /// native ships stationed, no metal, level 1.
    pub fn materialize(
        properties: CelestialBodyProperties,
        commitment: CommitmentHash,
        current_slot: u64,
    ) -> Self {
        let stats = apply_comets(
            base_stats(properties.body_type, properties.size),
            &properties.comets,
        );
        Self {
            commitment,
            properties,
            stats,
            level: 1,
            state: DynamicState {
                ship_count: stats.native_ships,
                metal_count: 0,
                last_updated_slot: current_slot,
            },
        }
    }

    /// Project the dynamic state to `current_slot` without committing it.
    ///
    /// Pure: ships and metal accrue lazily up to their capacities. The
    /// projection never rewinds the clock - a stale `current_slot` returns
    /// the state unchanged.
    pub fn projected(&self, current_slot: u64, game_speed: u64) -> DynamicState {
        DynamicState {
            ship_count: lazy_accrue(
                self.state.ship_count,
                self.stats.max_ship_capacity,
                self.stats.ship_gen_speed,
                self.state.last_updated_slot,
                current_slot,
                game_speed,
            ),
            metal_count: lazy_accrue(
                self.state.metal_count,
                self.stats.max_metal_capacity,
                self.stats.metal_gen_speed,
                self.state.last_updated_slot,
                current_slot,
                game_speed,
            ),
            last_updated_slot: current_slot.max(self.state.last_updated_slot),
        }
    }

    /// Project and commit the dynamic state.
    pub fn project_to(&mut self, current_slot: u64, game_speed: u64) {
        self.state = self.projected(current_slot, game_speed);
    }

    /// Upgrade the body one level, spending metal.
    ///
    /// The public on-chain transition: Planet-type only; both capacities and
    /// ship generation double, plus the chosen focus stat. State is projected
    /// to `current_slot` before the cost check.
    ///
    /// # Errors
    ///
    /// [`ParamError::NotUpgradable`] for non-Planet bodies,
    /// [`ParamError::InsufficientMetal`] when the projected stockpile cannot
    /// cover [`upgrade_cost`].
    pub fn upgrade(
        &mut self,
        focus: UpgradeFocus,
        current_slot: u64,
        game_speed: u64,
    ) -> Result<(), ParamError> {
        if self.properties.body_type != CelestialBodyType::Planet {
            return Err(ParamError::NotUpgradable);
        }

        self.project_to(current_slot, game_speed);

        let cost = upgrade_cost(self.level);
        if self.state.metal_count < cost {
            return Err(ParamError::InsufficientMetal {
                have: self.state.metal_count,
                need: cost,
            });
        }

        self.state.metal_count -= cost;
        self.level = self.level.saturating_add(1);

        // Both focus options double caps and ship generation.
        self.stats.max_ship_capacity = self.stats.max_ship_capacity.saturating_mul(2);
        self.stats.max_metal_capacity = self.stats.max_metal_capacity.saturating_mul(2);
        self.stats.ship_gen_speed = self.stats.ship_gen_speed.saturating_mul(2);

        match focus {
            UpgradeFocus::Range => {
                self.stats.range = self.stats.range.saturating_mul(2);
            }
            UpgradeFocus::LaunchVelocity => {
                self.stats.launch_velocity = self.stats.launch_velocity.saturating_mul(2);
            }
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::body::CometBoost;
    use crate::game::params::GAME_SPEED_ONE;

    fn planet(size: u8, comets: Vec<CometBoost>) -> CelestialBody {
        CelestialBody::materialize(
            CelestialBodyProperties {
                body_type: CelestialBodyType::Planet,
                size,
                comets,
            },
            [0xAB; 32],
            100,
        )
    }

    #[test]
    fn test_materialize_seeds_natives() {
        let body = planet(2, vec![]);
        assert_eq!(body.level, 1);
        assert_eq!(body.state.ship_count, 20);
        assert_eq!(body.state.metal_count, 0);
        assert_eq!(body.state.last_updated_slot, 100);
        assert_eq!(body.stats.max_ship_capacity, 400);
    }

    #[test]
    fn test_materialize_applies_comets() {
        let body = planet(2, vec![CometBoost::ShipCapacity]);
        assert_eq!(body.stats.max_ship_capacity, 800);
    }

    #[test]
    fn test_projection_accrues_and_caps() {
        let body = planet(2, vec![]);
        // gen 2/slot from slot 100: by slot 110, +20 ships.
        let projected = body.projected(110, GAME_SPEED_ONE);
        assert_eq!(projected.ship_count, 40);
        assert_eq!(projected.last_updated_slot, 110);

        // Far future: capped at capacity.
        let capped = body.projected(1_000_000, GAME_SPEED_ONE);
        assert_eq!(capped.ship_count, 400);
    }

    #[test]
    fn test_projection_never_rewinds() {
        let body = planet(2, vec![]);
        let projected = body.projected(50, GAME_SPEED_ONE);
        assert_eq!(projected, body.state);
    }

    #[test]
    fn test_upgrade_requires_planet() {
        let mut quasar = CelestialBody::materialize(
            CelestialBodyProperties {
                body_type: CelestialBodyType::Quasar,
                size: 3,
                comets: vec![],
            },
            [0; 32],
            0,
        );
        assert_eq!(
            quasar.upgrade(UpgradeFocus::Range, 10, GAME_SPEED_ONE),
            Err(ParamError::NotUpgradable)
        );
    }

    #[test]
    fn test_upgrade_spends_metal_and_doubles() {
        let mut body = planet(3, vec![]);
        body.state.metal_count = 500;

        let range_before = body.stats.range;
        let velocity_before = body.stats.launch_velocity;

        body.upgrade(UpgradeFocus::Range, 200, GAME_SPEED_ONE)
            .expect("upgrade should succeed");

        // Level 1 -> cost 200.
        assert_eq!(body.state.metal_count, 300);
        assert_eq!(body.level, 2);
        assert_eq!(body.stats.max_ship_capacity, 1800);
        assert_eq!(body.stats.ship_gen_speed, 6);
        assert_eq!(body.stats.range, range_before * 2);
        assert_eq!(body.stats.launch_velocity, velocity_before);
    }

    #[test]
    fn test_upgrade_insufficient_metal() {
        let mut body = planet(3, vec![]);
        let err = body
            .upgrade(UpgradeFocus::LaunchVelocity, 200, GAME_SPEED_ONE)
            .unwrap_err();
        assert_eq!(err, ParamError::InsufficientMetal { have: 0, need: 200 });
    }
}
