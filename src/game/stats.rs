//! Celestial Body Stats
//!
//! Derives the seven public stats of a body from its type and size, then
//! applies comet boosts. Capacities scale quadratically with size, generation
//! speeds linearly; range and launch velocity follow a power-of-two curve so
//! upgrade doublings land on the same lattice the verifier expects.
//!
//! Stats are recomputed from (type, size, comets), never mutated in place.

use serde::{Deserialize, Serialize};

use crate::game::body::{CelestialBodyType, CometBoost};

/// Upper clamp for the range/velocity power-of-two curve.
const POW2_STAT_MAX: u64 = 256;

/// The seven base stats of a celestial body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelestialBodyStats {
    /// Maximum ships the body can hold.
    pub max_ship_capacity: u64,
    /// Ships generated per elapsed slot unit.
    pub ship_gen_speed: u64,
    /// Maximum metal the body can hold.
    pub max_metal_capacity: u64,
    /// Metal generated per elapsed slot unit.
    pub metal_gen_speed: u64,
    /// Maximum send distance before all ships decay.
    pub range: u64,
    /// Travel speed of launched ships.
    pub launch_velocity: u64,
    /// Unowned defender ships present at discovery.
    pub native_ships: u64,
}

/// Round up to the next power of two, clamped to [1, 256].
#[inline]
pub fn pow2_ceil_clamped(n: u64) -> u64 {
    n.next_power_of_two().clamp(1, POW2_STAT_MAX)
}

/// Compute base stats for a body given its type and size.
///
/// `size` is the 1-6 class from [`determine_body`]; values outside that range
/// only occur on caller error and simply scale the same curves.
///
/// [`determine_body`]: crate::game::body::determine_body
pub fn base_stats(body_type: CelestialBodyType, size: u8) -> CelestialBodyStats {
    let s = u64::from(size);
    let s_sq = s * s;

    match body_type {
        CelestialBodyType::Planet => CelestialBodyStats {
            max_ship_capacity: 100 * s_sq,
            ship_gen_speed: s,
            max_metal_capacity: 0,
            metal_gen_speed: 0,
            range: pow2_ceil_clamped(3 + s),
            launch_velocity: pow2_ceil_clamped(1 + s),
            native_ships: if size == 1 { 0 } else { 10 * s },
        },
        CelestialBodyType::Quasar => CelestialBodyStats {
            max_ship_capacity: 500 * s_sq,
            ship_gen_speed: 0,
            max_metal_capacity: 500 * s_sq,
            metal_gen_speed: 0,
            range: pow2_ceil_clamped(2 + s),
            launch_velocity: pow2_ceil_clamped(1 + s),
            native_ships: 20 * s,
        },
        CelestialBodyType::SpacetimeRip => CelestialBodyStats {
            max_ship_capacity: 50 * s_sq,
            ship_gen_speed: s,
            max_metal_capacity: 0,
            metal_gen_speed: 0,
            range: pow2_ceil_clamped(2 + s),
            launch_velocity: pow2_ceil_clamped(1 + s),
            native_ships: 15 * s,
        },
        CelestialBodyType::AsteroidBelt => CelestialBodyStats {
            max_ship_capacity: 80 * s_sq,
            ship_gen_speed: 0,
            max_metal_capacity: 200 * s_sq,
            metal_gen_speed: 2 * s,
            range: pow2_ceil_clamped(2 + s),
            launch_velocity: pow2_ceil_clamped(1 + s),
            native_ships: 10 * s,
        },
    }
}

/// Apply comet boosts, returning a new stats value.
///
/// Each present comet doubles exactly one stat. Comets are distinct, so the
/// application order does not matter.
pub fn apply_comets(stats: CelestialBodyStats, comets: &[CometBoost]) -> CelestialBodyStats {
    let mut boosted = stats;
    for comet in comets {
        match comet {
            CometBoost::ShipCapacity => boosted.max_ship_capacity *= 2,
            CometBoost::MetalCapacity => boosted.max_metal_capacity *= 2,
            CometBoost::ShipGenSpeed => boosted.ship_gen_speed *= 2,
            CometBoost::MetalGenSpeed => boosted.metal_gen_speed *= 2,
            CometBoost::Range => boosted.range *= 2,
            CometBoost::LaunchVelocity => boosted.launch_velocity *= 2,
        }
    }
    boosted
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow2_ceil_clamped() {
        assert_eq!(pow2_ceil_clamped(0), 1);
        assert_eq!(pow2_ceil_clamped(1), 1);
        assert_eq!(pow2_ceil_clamped(2), 2);
        assert_eq!(pow2_ceil_clamped(3), 4);
        assert_eq!(pow2_ceil_clamped(5), 8);
        assert_eq!(pow2_ceil_clamped(9), 16);
        assert_eq!(pow2_ceil_clamped(256), 256);
        assert_eq!(pow2_ceil_clamped(257), 256);
        assert_eq!(pow2_ceil_clamped(100_000), 256);
    }

    #[test]
    fn test_planet_size_2_stats() {
        let stats = base_stats(CelestialBodyType::Planet, 2);
        assert_eq!(
            stats,
            CelestialBodyStats {
                max_ship_capacity: 400,
                ship_gen_speed: 2,
                max_metal_capacity: 0,
                metal_gen_speed: 0,
                range: 8,
                launch_velocity: 4,
                native_ships: 20,
            }
        );
    }

    #[test]
    fn test_miniscule_planet_has_no_natives() {
        let stats = base_stats(CelestialBodyType::Planet, 1);
        assert_eq!(stats.native_ships, 0);
        assert_eq!(stats.max_ship_capacity, 100);

        // Every other type keeps natives at size 1.
        assert_eq!(base_stats(CelestialBodyType::Quasar, 1).native_ships, 20);
        assert_eq!(
            base_stats(CelestialBodyType::SpacetimeRip, 1).native_ships,
            15
        );
        assert_eq!(
            base_stats(CelestialBodyType::AsteroidBelt, 1).native_ships,
            10
        );
    }

    #[test]
    fn test_capacity_scales_quadratically() {
        for size in 1u8..=6 {
            let s = u64::from(size);
            assert_eq!(
                base_stats(CelestialBodyType::Quasar, size).max_ship_capacity,
                500 * s * s
            );
            assert_eq!(
                base_stats(CelestialBodyType::AsteroidBelt, size).max_metal_capacity,
                200 * s * s
            );
        }
    }

    #[test]
    fn test_belt_generates_metal_only() {
        let stats = base_stats(CelestialBodyType::AsteroidBelt, 3);
        assert_eq!(stats.ship_gen_speed, 0);
        assert_eq!(stats.metal_gen_speed, 6);
    }

    #[test]
    fn test_apply_comets_scenario() {
        let base = base_stats(CelestialBodyType::Planet, 2);
        let boosted = apply_comets(base, &[CometBoost::ShipCapacity]);

        assert_eq!(boosted.max_ship_capacity, 800);
        // Everything else untouched.
        assert_eq!(
            CelestialBodyStats {
                max_ship_capacity: base.max_ship_capacity,
                ..boosted
            },
            base
        );
    }

    #[test]
    fn test_apply_comets_commutative() {
        let base = base_stats(CelestialBodyType::Quasar, 4);
        let ab = apply_comets(base, &[CometBoost::Range, CometBoost::MetalCapacity]);
        let ba = apply_comets(base, &[CometBoost::MetalCapacity, CometBoost::Range]);
        assert_eq!(ab, ba);
        assert_eq!(ab.range, base.range * 2);
        assert_eq!(ab.max_metal_capacity, base.max_metal_capacity * 2);
    }

    #[test]
    fn test_apply_comets_does_not_mutate_input() {
        let base = base_stats(CelestialBodyType::SpacetimeRip, 5);
        let _ = apply_comets(base, &[CometBoost::ShipGenSpeed]);
        assert_eq!(base, base_stats(CelestialBodyType::SpacetimeRip, 5));
    }
}
