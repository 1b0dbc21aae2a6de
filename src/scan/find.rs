//! First-Match Search
//!
//! A bounded, sequential, deterministic raster over the map. Used for spawn
//! candidate hunting, where repeated runs with identical parameters must
//! converge on the same coordinate in the same order. A small early-exit
//! search gains nothing from parallelism, so none is offered.

use tracing::debug;

use crate::core::coords::Coordinate;
use crate::core::hash::HashEngine;
use crate::game::body::{determine_body, CelestialBodyProperties};
use crate::game::params::{GameParameters, ParamError};
use crate::scan::coordinator::{Discovery, ScanError};
use crate::scan::region::ScanRegion;

/// Find the first coordinate whose derived properties satisfy `predicate`.
///
/// Rasters row-major over the map-diameter square centered on the origin,
/// translating every candidate by `start_offset`. Translated candidates that
/// fall outside map bounds are skipped but still consume attempts. The scan
/// stops at the first match, after `max_attempts` candidates, or when the
/// raster is exhausted, whichever comes first.
///
/// # Errors
///
/// [`ScanError::Params`] on malformed input, [`ScanError::SearchExhausted`]
/// when the budget runs out. The latter is recoverable: widen the budget or
/// move the start offset.
pub fn find_first_match<P>(
    params: &GameParameters,
    predicate: P,
    start_offset: Coordinate,
    max_attempts: u64,
) -> Result<Discovery, ScanError>
where
    P: Fn(&CelestialBodyProperties) -> bool,
{
    params.validate()?;
    let mut engine =
        HashEngine::new(params.hash_rounds).map_err(|_| ParamError::InvalidRounds)?;

    let raster = ScanRegion::centered(params.half_extent());
    let mut attempts = 0u64;

    for base in raster.iter() {
        if attempts >= max_attempts {
            break;
        }
        attempts += 1;

        let candidate = base.translated(start_offset.x, start_offset.y);
        if !params.contains(candidate) {
            continue;
        }

        let property = engine.property_hash(candidate.x, candidate.y, params.game_id);
        if let Some(properties) = determine_body(&property, &params.thresholds) {
            if predicate(&properties) {
                debug!(%candidate, attempts, "first match found");
                let commitment =
                    engine.commitment_hash(candidate.x, candidate.y, params.game_id);
                return Ok(Discovery {
                    coordinate: candidate,
                    commitment,
                    properties,
                });
            }
        }
    }

    Err(ScanError::SearchExhausted { attempts })
}

// =============================================================================
// TESTS
// =============================================================================
