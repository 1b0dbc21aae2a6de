//! Coordinate Digests
//!
//! The two hash primitives behind fog-of-war discovery:
//! - Commitment hash: BLAKE3 over (x, y, game_id), the discovery proof and
//!   key-derivation seed for a coordinate.
//! - Property hash: SHA3-256 over the same fields plus zero padding, consumed
//!   exclusively by body generation.
//!
//! Both are iterated `rounds` times (`hash_k = H(hash_{k-1})`), the game's
//! difficulty knob. Input serialization, digest choice, and iteration order
//! are a wire format shared with the on-chain program and the MPC circuit:
//! every byte here is an external contract, not a design freedom.

use sha3::{Digest, Sha3_256};
use thiserror::Error;

/// Commitment digest over a coordinate (32 bytes).
pub type CommitmentHash = [u8; 32];

/// Property digest over a coordinate (32 bytes).
pub type PropertyHash = [u8; 32];

/// Commitment hash input width: i64 x, i64 y, u64 game_id, little-endian.
const COMMITMENT_INPUT_LEN: usize = 24;

/// Property hash input width: the same fields plus 8 trailing zero bytes.
const PROPERTY_INPUT_LEN: usize = 32;

/// Rejected engine construction: the difficulty knob must be at least 1.
///
/// A caller error, never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("hash rounds must be at least 1")]
pub struct InvalidRounds;

/// Iterated digest engine for one scan task.
///
/// Owns the validated round count and a scratch input buffer that is fully
/// overwritten on every call. Engines are cheap; give each worker its own
/// rather than sharing one across tasks.
#[derive(Debug, Clone)]
pub struct HashEngine {
    rounds: u32,
    input: [u8; PROPERTY_INPUT_LEN],
}

impl HashEngine {
    /// Create an engine with the given difficulty.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRounds`] when `rounds == 0`.
    pub fn new(rounds: u32) -> Result<Self, InvalidRounds> {
        if rounds == 0 {
            return Err(InvalidRounds);
        }
        Ok(Self {
            rounds,
            input: [0u8; PROPERTY_INPUT_LEN],
        })
    }

    /// The configured round count.
    #[inline]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Serialize the three fields into the scratch buffer (little-endian).
    #[inline]
    fn fill_input(&mut self, x: i64, y: i64, game_id: u64) {
        self.input[0..8].copy_from_slice(&x.to_le_bytes());
        self.input[8..16].copy_from_slice(&y.to_le_bytes());
        self.input[16..24].copy_from_slice(&game_id.to_le_bytes());
        self.input[24..32].fill(0);
    }

    /// Commitment hash for a coordinate: 24-byte LE input, BLAKE3, iterated.
    pub fn commitment_hash(&mut self, x: i64, y: i64, game_id: u64) -> CommitmentHash {
        self.fill_input(x, y, game_id);
        let mut digest = *blake3::hash(&self.input[..COMMITMENT_INPUT_LEN]).as_bytes();
        for _ in 1..self.rounds {
            digest = *blake3::hash(&digest).as_bytes();
        }
        digest
    }

    /// Property hash for a coordinate: 32-byte zero-padded LE input,
    /// SHA3-256, iterated.
    pub fn property_hash(&mut self, x: i64, y: i64, game_id: u64) -> PropertyHash {
        self.fill_input(x, y, game_id);
        let mut digest: PropertyHash = Sha3_256::digest(self.input).into();
        for _ in 1..self.rounds {
            digest = Sha3_256::digest(digest).into();
        }
        digest
    }
}

/// One-shot commitment hash (constructs a throwaway engine).
///
/// # Errors
///
/// Returns [`InvalidRounds`] when `rounds == 0`.
pub fn commitment_hash(
    x: i64,
    y: i64,
    game_id: u64,
    rounds: u32,
) -> Result<CommitmentHash, InvalidRounds> {
    Ok(HashEngine::new(rounds)?.commitment_hash(x, y, game_id))
}

/// One-shot property hash (constructs a throwaway engine).
///
/// # Errors
///
/// Returns [`InvalidRounds`] when `rounds == 0`.
pub fn property_hash(
    x: i64,
    y: i64,
    game_id: u64,
    rounds: u32,
) -> Result<PropertyHash, InvalidRounds> {
    Ok(HashEngine::new(rounds)?.property_hash(x, y, game_id))
}

// =============================================================================
// TESTS
// =============================================================================
