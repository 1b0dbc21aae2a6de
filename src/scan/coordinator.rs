//! Scan Coordination
//!
//! Drives the hash engine and body generator over a region, either on the
//! calling thread or fanned out across the rayon pool. Workers share nothing:
//! each owns its sub-region and its own engine scratch buffer, and the
//! coordinator waits on a join barrier before merging the per-worker results.
//!
//! There is no built-in cancellation and no retry. A worker failure surfaces
//! the partial aggregate plus the failed sub-regions so the caller can
//! selectively re-dispatch.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::coords::Coordinate;
use crate::core::hash::{CommitmentHash, HashEngine};
use crate::game::body::{determine_body, CelestialBodyProperties};
use crate::game::params::{GameParameters, ParamError};
use crate::scan::region::ScanRegion;

/// One discovered coordinate: the proof hash plus the derived content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    /// Where the body is.
    pub coordinate: Coordinate,
    /// Discovery proof / key-derivation seed for this coordinate.
    pub commitment: CommitmentHash,
    /// Generated content.
    pub properties: CelestialBodyProperties,
}

/// Aggregate result of a scan.
///
/// Discovery order across workers is unordered-commutative; callers must not
/// rely on it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Coordinates examined.
    pub processed: u64,
    /// Coordinates holding a body.
    pub found: u64,
    /// The discovered bodies.
    pub discoveries: Vec<Discovery>,
}

impl ScanResult {
    /// Fold another result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.processed += other.processed;
        self.found += other.found;
        self.discoveries.extend(other.discoveries);
    }
}

/// Lifecycle of one scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanPhase {
    /// No scan dispatched yet.
    Idle,
    /// Splitting the region into worker tasks.
    Partitioning,
    /// Workers running.
    Running,
    /// Merging worker results.
    Aggregating,
    /// Last scan completed.
    Done,
    /// Last scan ended with a worker failure.
    Aborted,
}

/// Scan failures.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Malformed caller input.
    #[error(transparent)]
    Params(#[from] ParamError),

    /// First-match search ran out of budget. Recoverable: widen the budget
    /// or move the start offset.
    #[error("search exhausted after {attempts} attempts")]
    SearchExhausted {
        /// Attempts consumed before giving up.
        attempts: u64,
    },

    /// One or more workers terminated abnormally. Carries everything the
    /// caller needs for selective re-dispatch; nothing is retried here.
    #[error("{} scan worker(s) failed", failed.len())]
    WorkerFailed {
        /// Sub-regions whose workers died.
        failed: Vec<ScanRegion>,
        /// Merged results of the workers that survived.
        partial: ScanResult,
    },
}

/// Scan a region on the calling thread.
///
/// Examines every coordinate exactly once in row-major order, reusing one
/// engine (and therefore one scratch buffer) for the whole region. This is
/// also the per-task body of the parallel scan.
///
/// # Errors
///
/// Fails fast on malformed parameters; never fails afterwards.
pub fn scan_region(region: ScanRegion, params: &GameParameters) -> Result<ScanResult, ParamError> {
    params.validate()?;
    let mut engine =
        HashEngine::new(params.hash_rounds).map_err(|_| ParamError::InvalidRounds)?;

    let mut result = ScanResult::default();
    for coord in region.iter() {
        result.processed += 1;

        let property = engine.property_hash(coord.x, coord.y, params.game_id);
        if let Some(properties) = determine_body(&property, &params.thresholds) {
            // Commitment only matters for coordinates that hold a body.
            let commitment = engine.commitment_hash(coord.x, coord.y, params.game_id);
            result.found += 1;
            result.discoveries.push(Discovery {
                coordinate: coord,
                commitment,
                properties,
            });
        }
    }
    Ok(result)
}

/// Partitions a scan across workers and aggregates their results.
#[derive(Debug)]
pub struct ScanCoordinator {
    worker_count: usize,
    phase: ScanPhase,
}

impl ScanCoordinator {
    /// Create a coordinator that targets `worker_count` parallel tasks.
    ///
    /// Zero is treated as one. The actual thread count is the rayon pool's
    /// business; this only controls how many sub-regions are dispatched.
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
            phase: ScanPhase::Idle,
        }
    }

    /// Phase of the most recent scan.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Scan `region` across the worker pool and merge the results.
    ///
    /// Dispatches one task per sub-region, joins all of them at a barrier,
    /// then merges. Worker panics are caught per task: surviving results are
    /// kept and returned inside [`ScanError::WorkerFailed`] together with the
    /// failed sub-regions.
    ///
    /// # Errors
    ///
    /// [`ScanError::Params`] on malformed input, [`ScanError::WorkerFailed`]
    /// when any worker dies.
    pub fn scan(
        &mut self,
        region: ScanRegion,
        params: &GameParameters,
    ) -> Result<ScanResult, ScanError> {
        self.phase = ScanPhase::Partitioning;
        params.validate()?;
        if region.is_empty() {
            self.phase = ScanPhase::Idle;
            return Err(ParamError::EmptyRegion.into());
        }

        let parts = region.partition(self.worker_count);
        debug!(
            sub_regions = parts.len(),
            coordinates = region.coordinate_count(),
            "partitioned scan region"
        );

        let result = self.run_partitions(&parts, |sub| {
            // Each task scans from its own parameter snapshot.
            let task_params = *params;
            scan_region(sub, &task_params)
        });

        if let Ok(ref merged) = result {
            info!(
                processed = merged.processed,
                found = merged.found,
                "scan complete"
            );
        }
        result
    }

    /// Dispatch one worker per sub-region, join, and merge.
    ///
    /// A worker counts as failed when it panics or returns an error. The
    /// generic worker seam keeps failure handling testable; `scan` is the
    /// only production caller.
    fn run_partitions<F>(
        &mut self,
        parts: &[ScanRegion],
        worker: F,
    ) -> Result<ScanResult, ScanError>
    where
        F: Fn(ScanRegion) -> Result<ScanResult, ParamError> + Sync,
    {
        self.phase = ScanPhase::Running;

        // collect() is the join barrier: every task finishes before any
        // result is merged.
        let outcomes: Vec<(ScanRegion, Result<ScanResult, ()>)> = parts
            .par_iter()
            .map(|sub| {
                let outcome = catch_unwind(AssertUnwindSafe(|| worker(*sub)))
                    .map_err(|_| ())
                    .and_then(|res| res.map_err(|_| ()));
                (*sub, outcome)
            })
            .collect();

        self.phase = ScanPhase::Aggregating;
        let mut merged = ScanResult::default();
        let mut failed = Vec::new();
        for (sub, outcome) in outcomes {
            match outcome {
                Ok(result) => merged.merge(result),
                Err(()) => failed.push(sub),
            }
        }

        if failed.is_empty() {
            self.phase = ScanPhase::Done;
            Ok(merged)
        } else {
            self.phase = ScanPhase::Aborted;
            warn!(failed = failed.len(), "scan workers failed");
            Err(ScanError::WorkerFailed {
                failed,
                partial: merged,
            })
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
