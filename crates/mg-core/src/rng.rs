//! Deterministic per-crop and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each crop gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (crop_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive crop IDs uniformly across the seed space.
//! This means:
//!
//! - Crops never share RNG state, so a crop's soil sample depends only on
//!   the seed and its own ID.
//! - Appending a crop to the table does not disturb the samples already drawn
//!   for existing crops.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::CropId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── CropRng ───────────────────────────────────────────────────────────────────

/// Per-crop deterministic RNG.
///
/// Used once at table construction to draw the crop's soil sample.
pub struct CropRng(SmallRng);

impl CropRng {
    /// Seed deterministically from the run's global seed and a crop ID.
    pub fn new(global_seed: u64, crop: CropId) -> Self {
        let seed = global_seed ^ (crop.0 as u64).wrapping_mul(MIXING_CONSTANT);
        CropRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (synthetic dust-storm noise).
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
