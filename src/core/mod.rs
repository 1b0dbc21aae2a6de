//! Core deterministic primitives.
//!
//! Everything in this module is part of the compatibility contract with the
//! remote verifier: coordinate encoding, the distance metric, and the two
//! iterated digests. Changing any of it breaks consensus on the shared world.

pub mod coords;
pub mod hash;

// Re-export core types
pub use coords::Coordinate;
pub use hash::{commitment_hash, property_hash, CommitmentHash, HashEngine, PropertyHash};
