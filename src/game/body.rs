//! Celestial Body Derivation
//!
//! Pure mapping from a property hash and noise thresholds to generated
//! content. This is the noise function of the universe: the on-chain program
//! and the MPC circuit evaluate the same byte comparisons, so every branch
//! below - including the comet collision rule - is frozen.

use serde::{Deserialize, Serialize};

use crate::core::hash::PropertyHash;
use crate::game::params::NoiseThresholds;

/// The four kinds of celestial body.
///
/// A closed enumeration: every consumer matches it exhaustively, so adding a
/// variant is a compile-checked protocol change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CelestialBodyType {
    /// Generates ships; the only upgradable body.
    Planet,
    /// Large ship and metal reservoirs, no generation.
    Quasar,
    /// Small, fast ship generator.
    SpacetimeRip,
    /// Metal generator.
    AsteroidBelt,
}

/// Stat boosts carried by comets. Each present comet doubles one stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CometBoost {
    /// Doubles max ship capacity.
    ShipCapacity,
    /// Doubles max metal capacity.
    MetalCapacity,
    /// Doubles ship generation speed.
    ShipGenSpeed,
    /// Doubles metal generation speed.
    MetalGenSpeed,
    /// Doubles range.
    Range,
    /// Doubles launch velocity.
    LaunchVelocity,
}

/// Generated content at a coordinate.
///
/// Invariants: `size` in 1..=6, `comets` holds at most two distinct kinds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelestialBodyProperties {
    /// Body kind, from byte 1 of the property hash.
    pub body_type: CelestialBodyType,
    /// Size class 1-6, from byte 2.
    pub size: u8,
    /// Zero to two distinct comet boosts, from bytes 3-5.
    pub comets: Vec<CometBoost>,
}

/// Derive celestial body properties from a property hash.
///
/// Returns `None` for dead space. Bucket-boundary ties always resolve to the
/// lower bucket; the comparison order must be preserved exactly.
pub fn determine_body(
    hash: &PropertyHash,
    thresholds: &NoiseThresholds,
) -> Option<CelestialBodyProperties> {
    let byte0 = hash[0];
    let byte1 = hash[1];
    let byte2 = hash[2];
    let byte3 = hash[3];
    let byte4 = hash[4];
    let byte5 = hash[5];

    // Byte 0: dead space check
    if byte0 < thresholds.dead_space_threshold {
        return None;
    }

    // Byte 1: body type, first satisfied threshold wins
    let body_type = if byte1 < thresholds.planet_threshold {
        CelestialBodyType::Planet
    } else if byte1 < thresholds.quasar_threshold {
        CelestialBodyType::Quasar
    } else if byte1 < thresholds.spacetime_rip_threshold {
        CelestialBodyType::SpacetimeRip
    } else {
        CelestialBodyType::AsteroidBelt
    };

    // Byte 2: size ladder (1-6)
    let size = if byte2 < thresholds.size_threshold_1 {
        1u8
    } else if byte2 < thresholds.size_threshold_2 {
        2
    } else if byte2 < thresholds.size_threshold_3 {
        3
    } else if byte2 < thresholds.size_threshold_4 {
        4
    } else if byte2 < thresholds.size_threshold_5 {
        5
    } else {
        6
    };

    // Byte 3: comet count (0-216 = none, 217-242 = one, 243-255 = two)
    let num_comets = if byte3 <= 216 {
        0u8
    } else if byte3 <= 242 {
        1
    } else {
        2
    };

    // Bytes 4-5: which stats the comets boost
    let mut comets = Vec::new();
    if num_comets >= 1 {
        comets.push(comet_from_byte(byte4));
    }
    if num_comets >= 2 {
        let mut second = comet_from_byte(byte5);
        // Collision rule: recompute from (byte5 + 1) mod 256. Arbitrary
        // looking, but the circuit does exactly this.
        if second == comets[0] {
            second = comet_from_byte(byte5.wrapping_add(1));
        }
        comets.push(second);
    }

    Some(CelestialBodyProperties {
        body_type,
        size,
        comets,
    })
}

/// Map a hash byte to a comet boost kind (mod 6).
fn comet_from_byte(b: u8) -> CometBoost {
    match b % 6 {
        0 => CometBoost::ShipCapacity,
        1 => CometBoost::MetalCapacity,
        2 => CometBoost::ShipGenSpeed,
        3 => CometBoost::MetalGenSpeed,
        4 => CometBoost::Range,
        _ => CometBoost::LaunchVelocity,
    }
}

// =============================================================================
// TESTS
// =============================================================================
