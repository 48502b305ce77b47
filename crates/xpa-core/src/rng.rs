//! Seeded RNG used to draw simulated identifiers.
//!
//! Assignment itself never touches randomness; this only feeds simulations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

use crate::key::Identifier;

/// Deterministic RNG handle.
///
/// Substreams are derived by hashing `(master_seed, substream)` with
/// SipHash-1-3 under zero keys, so the same seed yields the same identifiers
/// on every platform.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the handle for one substream of `master_seed`.
    pub fn substream(master_seed: u64, substream: u64) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, substream))
    }

    /// Draws an integer identifier uniformly from `[0, upper)`.
    pub fn next_identifier(&mut self, upper: u64) -> Identifier {
        Identifier::from(self.rng.gen_range(0..upper.max(1)))
    }
}

/// Derives the deterministic seed for a specific substream.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
