//! Deterministic seed derivation and determinism verification.
//!
//! Placement draws come from one independent stream per chunk, derived from the
//! world seed and chunk coordinate, so concurrent chunk workers never share RNG
//! state and the order in which chunks are generated does not matter.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::biome::Template;
use crate::generator::WorldGenerator;
use crate::rng::WorldRng;

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Derive a u64 seed for a chunk from the world seed and chunk coordinate.
///
/// Uses `FxHasher`, which has no per-process random keys, so every client
/// derives the same chunk seed.
pub fn derive_chunk_seed(world_seed: u64, chunk_x: i64, chunk_z: i64) -> u64 {
    let mut hasher = FxHasher::default();
    world_seed.hash(&mut hasher);
    chunk_x.hash(&mut hasher);
    chunk_z.hash(&mut hasher);
    hasher.finish()
}

/// Derive the placement RNG for a specific chunk.
pub fn chunk_rng(world_seed: u64, chunk_x: i64, chunk_z: i64) -> WorldRng {
    WorldRng::seeded(derive_chunk_seed(world_seed, chunk_x, chunk_z))
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Hash elevation, moisture, and biome over a regular grid.
///
/// Samples at `min + i * step` for every `i` whose offset stays inside
/// `[min, max)` on both axes. Two generators built from the same seed and
/// parameters hash identically.
pub fn hash_region<T: Template>(
    generator: &WorldGenerator<T>,
    min: (f64, f64),
    max: (f64, f64),
    step: f64,
) -> u64 {
    let mut hasher = FxHasher::default();
    let columns = grid_steps(min.0, max.0, step);
    let rows = grid_steps(min.1, max.1, step);
    for row in 0..rows {
        let z = min.1 + row as f64 * step;
        for column in 0..columns {
            let x = min.0 + column as f64 * step;
            let sample = generator.sample_column(x, z);
            sample.elevation.to_bits().hash(&mut hasher);
            sample.moisture.to_bits().hash(&mut hasher);
            sample.biome.hash(&mut hasher);
        }
    }
    hasher.finish()
}

/// Number of `step` offsets from `min` that fall below `max`.
///
/// Zero for empty or inverted ranges and for steps that are not positive
/// and finite.
fn grid_steps(min: f64, max: f64, step: f64) -> u64 {
    let steps = ((max - min) / step).ceil();
    if step > 0.0 && steps.is_finite() && steps > 0.0 {
        steps as u64
    } else {
        0
    }
}
