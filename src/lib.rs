//! # Encrypted Forest World Generation Core
//!
//! Deterministic world generation and discovery engine for Encrypted Forest,
//! designed to agree bit-for-bit with the on-chain program and its MPC circuit.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ENCRYPTED FOREST CORE                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── coords.rs   - Coordinate addressing + distance metric   │
//! │  └── hash.rs     - Commitment/property digests (iterated)    │
//! │                                                              │
//! │  game/           - Generation and economy (deterministic)    │
//! │  ├── params.rs   - Game parameters and noise thresholds      │
//! │  ├── body.rs     - Hash -> celestial body derivation         │
//! │  ├── stats.rs    - Base stats and comet boosts               │
//! │  ├── economy.rs  - Lazy accrual, decay, travel, upgrades     │
//! │  └── state.rs    - Discovered-body state projection          │
//! │                                                              │
//! │  scan/           - Coordinate-space search                   │
//! │  ├── region.rs   - Rectangular regions and partitioning      │
//! │  ├── coordinator.rs - Parallel scan with join barrier        │
//! │  └── find.rs     - Bounded sequential first-match search     │
//! │                                                              │
//! │  cost/           - Remote verification cost model            │
//! │  └── advisor.rs  - Rounds -> compute-unit estimates          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/`, `game/`, and `scan/` modules are **100% deterministic**:
//! - No floating-point arithmetic anywhere in derivation or economy math
//! - All integer division truncates, matching the on-chain program
//! - No system time dependencies; slots are supplied by the caller
//! - Hash inputs are fixed-width little-endian, a frozen wire format
//!
//! Given identical coordinates and game parameters, every function here
//! produces **identical results** on any platform - and identical results to
//! the remote verifier, which is what makes fog-of-war discovery provable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod cost;
pub mod game;
pub mod scan;

// Re-export commonly used types
pub use crate::core::coords::Coordinate;
pub use crate::core::hash::{CommitmentHash, HashEngine, PropertyHash};
pub use game::body::{CelestialBodyProperties, CelestialBodyType, CometBoost};
pub use game::params::{GameParameters, NoiseThresholds, ParamError};
pub use game::stats::CelestialBodyStats;
pub use scan::coordinator::{Discovery, ScanCoordinator, ScanError, ScanResult};
pub use scan::region::ScanRegion;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
