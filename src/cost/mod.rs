//! Remote Verification Cost Model
//!
//! Advisory estimates of what a rounds value costs the remote verifier.
//! Nothing here gates correctness; the scanner never consults it.

pub mod advisor;

// Re-export key types
pub use advisor::{
    estimate_cost, fits_budget, max_safe_rounds, sweep, CostReport, COMPUTE_UNITS_PER_HASH_ROUND,
    MAX_VERIFY_BUDGET,
};
