//! Public Economy Math
//!
//! Lazy resource accrual, distance decay, travel scheduling, and the upgrade
//! cost curve. Integer arithmetic only - every division truncates and every
//! formula matches the on-chain program operation for operation, including
//! the zero-value edge cases.
//!
//! Nothing here advances a clock. State moves forward only when a caller
//! projects it to an explicit slot.

use crate::core::coords::{chebyshev_octile, Coordinate};
use crate::game::params::GAME_SPEED_ONE;

/// Resource count after lazy generation up to `current_slot`.
///
/// Returns `last_amount` unchanged when the body does not generate this
/// resource, no time has passed, or the game speed is zero. Otherwise the
/// generated amount is `gen_speed * elapsed * 10_000 / game_speed`
/// (truncating), capped at `max_capacity`.
pub fn lazy_accrue(
    last_amount: u64,
    max_capacity: u64,
    gen_speed: u64,
    last_slot: u64,
    current_slot: u64,
    game_speed: u64,
) -> u64 {
    if gen_speed == 0 || current_slot <= last_slot || game_speed == 0 {
        return last_amount;
    }
    let elapsed = current_slot - last_slot;
    let generated = gen_speed
        .saturating_mul(elapsed)
        .saturating_mul(GAME_SPEED_ONE)
        / game_speed;
    max_capacity.min(last_amount.saturating_add(generated))
}

/// Distance between two points under the protocol metric.
#[inline]
pub fn distance(x1: i64, y1: i64, x2: i64, y2: i64) -> u64 {
    chebyshev_octile(Coordinate::new(x1, y1), Coordinate::new(x2, y2))
}

/// Ships surviving a journey: one lost per full `range` of distance.
///
/// A zero range means nothing survives any journey.
pub fn distance_decay(ships: u64, distance: u64, range: u64) -> u64 {
    if range == 0 {
        return 0;
    }
    let lost = distance / range;
    ships.saturating_sub(lost)
}

/// Slot at which a fleet launched now lands, or `None` when it never lands
/// (zero launch velocity).
///
/// Travel time is `distance * game_speed / (launch_velocity * 10_000)`,
/// truncating.
pub fn landing_slot(
    current_slot: u64,
    distance: u64,
    launch_velocity: u64,
    game_speed: u64,
) -> Option<u64> {
    if launch_velocity == 0 {
        return None;
    }
    let travel = distance.saturating_mul(game_speed) / launch_velocity.saturating_mul(GAME_SPEED_ONE);
    Some(current_slot.saturating_add(travel))
}

/// Metal cost of upgrading from `level`: `100 * 2^level`, saturating.
pub fn upgrade_cost(level: u8) -> u64 {
    1u64.checked_shl(u32::from(level))
        .map_or(u64::MAX, |pow| 100u64.saturating_mul(pow))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accrue_caps_at_capacity() {
        // gen 1 over 10_000 slots at 1.0x speed = 10_000 generated, capped.
        assert_eq!(lazy_accrue(50, 100, 1, 0, 10_000, GAME_SPEED_ONE), 100);
    }

    #[test]
    fn test_accrue_identity_cases() {
        assert_eq!(lazy_accrue(7, 100, 0, 0, 50, GAME_SPEED_ONE), 7);
        assert_eq!(lazy_accrue(7, 100, 3, 50, 50, GAME_SPEED_ONE), 7);
        assert_eq!(lazy_accrue(7, 100, 3, 50, 10, GAME_SPEED_ONE), 7);
        assert_eq!(lazy_accrue(7, 100, 3, 0, 50, 0), 7);
    }

    #[test]
    fn test_accrue_speed_scaling() {
        // 2.0x game speed halves the per-slot yield (truncating).
        assert_eq!(lazy_accrue(0, 1000, 1, 0, 9, 2 * GAME_SPEED_ONE), 4);
        // 0.5x game speed doubles it.
        assert_eq!(lazy_accrue(0, 1000, 1, 0, 9, GAME_SPEED_ONE / 2), 18);
    }

    #[test]
    fn test_decay_zero_range_kills_all() {
        assert_eq!(distance_decay(1000, 1, 0), 0);
        assert_eq!(distance_decay(1000, 0, 0), 0);
    }

    #[test]
    fn test_decay_floor() {
        assert_eq!(distance_decay(3, 100, 10), 0);
        assert_eq!(distance_decay(10, 25, 10), 8);
        assert_eq!(distance_decay(10, 9, 10), 10);
    }

    #[test]
    fn test_landing_slot_guard() {
        assert_eq!(landing_slot(100, 50, 0, GAME_SPEED_ONE), None);
    }

    #[test]
    fn test_landing_slot_truncates() {
        // distance 10 at velocity 4, 1.0x: 10 * 10_000 / 40_000 = 2.
        assert_eq!(landing_slot(100, 10, 4, GAME_SPEED_ONE), Some(102));
        // Zero distance lands immediately.
        assert_eq!(landing_slot(100, 0, 4, GAME_SPEED_ONE), Some(100));
        // Slower game speed shortens travel in slots.
        assert_eq!(landing_slot(100, 10, 4, GAME_SPEED_ONE / 2), Some(101));
    }

    #[test]
    fn test_upgrade_cost_curve() {
        assert_eq!(upgrade_cost(0), 100);
        assert_eq!(upgrade_cost(1), 200);
        assert_eq!(upgrade_cost(5), 3200);
        assert_eq!(upgrade_cost(63), 100u64.saturating_mul(1 << 63));
        assert_eq!(upgrade_cost(64), u64::MAX);
        assert_eq!(upgrade_cost(255), u64::MAX);
    }

    proptest! {
        /// Accrual never exceeds capacity and never shrinks the balance
        /// (below capacity).
        #[test]
        fn prop_accrue_bounded(
            last in 0u64..=1_000_000,
            cap in 0u64..=1_000_000,
            gen in 0u64..=1_000,
            last_slot in 0u64..=100_000,
            elapsed in 0u64..=100_000,
            speed in 1u64..=100_000,
        ) {
            let current = last_slot + elapsed;
            let result = lazy_accrue(last, cap, gen, last_slot, current, speed);
            prop_assert!(result <= cap.max(last));
            prop_assert!(result >= last.min(cap));
        }

        /// Accrual is non-decreasing in elapsed slots.
        #[test]
        fn prop_accrue_monotonic(
            last in 0u64..=1_000,
            cap in 0u64..=1_000_000,
            gen in 1u64..=100,
            t1 in 0u64..=50_000,
            dt in 0u64..=50_000,
            speed in 1u64..=100_000,
        ) {
            let a = lazy_accrue(last, cap, gen, 0, t1, speed);
            let b = lazy_accrue(last, cap, gen, 0, t1 + dt, speed);
            prop_assert!(b >= a);
        }

        /// Decay never returns more ships than were sent.
        #[test]
        fn prop_decay_bounded(
            ships in 0u64..=1_000_000,
            dist in 0u64..=1_000_000,
            range in 0u64..=1_000,
        ) {
            prop_assert!(distance_decay(ships, dist, range) <= ships);
        }

        /// Landing never precedes departure.
        #[test]
        fn prop_landing_after_departure(
            slot in 0u64..=1_000_000,
            dist in 0u64..=1_000_000,
            velocity in 1u64..=512,
            speed in 1u64..=100_000,
        ) {
            let landing = landing_slot(slot, dist, velocity, speed);
            prop_assert!(landing.is_some_and(|l| l >= slot));
        }
    }
}
