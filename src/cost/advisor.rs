//! Difficulty Advisor
//!
//! Translates an iterated-hash rounds value into an estimated remote
//! verification cost and checks it against the per-transaction compute
//! budget. Consulted at game-creation time; a failing report is a warning,
//! never an error - the generation math works at any difficulty, the remote
//! verifier just may refuse to re-verify it.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Remote per-transaction compute budget, in compute units.
pub const MAX_VERIFY_BUDGET: u64 = 1_400_000;

/// Estimated compute units one hash round costs the remote verifier.
pub const COMPUTE_UNITS_PER_HASH_ROUND: u64 = 3_000;

/// Verdict for one candidate rounds value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostReport {
    /// Candidate difficulty.
    pub rounds: u32,
    /// Estimated verification cost in compute units.
    pub units: u64,
    /// Budget the estimate was checked against (reserve already deducted).
    pub budget: u64,
    /// Whether re-verification fits the budget.
    pub fits: bool,
}

/// Estimated remote verification cost of `rounds` iterated hashes.
#[inline]
pub fn estimate_cost(rounds: u32) -> u64 {
    u64::from(rounds).saturating_mul(COMPUTE_UNITS_PER_HASH_ROUND)
}

/// Whether `rounds` fits the remote budget after reserving `overhead_reserve`
/// compute units for the rest of the verifying transaction.
#[inline]
pub fn fits_budget(rounds: u32, overhead_reserve: u64) -> bool {
    estimate_cost(rounds) <= MAX_VERIFY_BUDGET.saturating_sub(overhead_reserve)
}

/// Largest rounds value that still fits the budget under the given reserve.
#[inline]
pub fn max_safe_rounds(overhead_reserve: u64) -> u32 {
    let available = MAX_VERIFY_BUDGET.saturating_sub(overhead_reserve);
    u32::try_from(available / COMPUTE_UNITS_PER_HASH_ROUND).unwrap_or(u32::MAX)
}

/// Assess one candidate rounds value, warning on infeasible difficulty.
pub fn assess(rounds: u32, overhead_reserve: u64) -> CostReport {
    let units = estimate_cost(rounds);
    let budget = MAX_VERIFY_BUDGET.saturating_sub(overhead_reserve);
    let fits = units <= budget;
    if !fits {
        warn!(
            rounds,
            units, budget, "rounds value exceeds the remote verification budget"
        );
    }
    CostReport {
        rounds,
        units,
        budget,
        fits,
    }
}

/// Assess a set of candidate rounds values (the CLI sweep mode).
pub fn sweep(
    candidates: impl IntoIterator<Item = u32>,
    overhead_reserve: u64,
) -> Vec<CostReport> {
    candidates
        .into_iter()
        .map(|rounds| assess(rounds, overhead_reserve))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
