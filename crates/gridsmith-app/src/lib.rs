//! Batch generation services built on [`gridsmith_generator`].
//!
//! - [`worker`]: a lazily started background thread answering whole batches
//! - [`inventory`]: bucketed puzzle storage with a capacity ceiling and a
//!   [`refill`](inventory::refill) helper driven by the worker
//! - [`generate_batch`]: in-process batch generation, optionally spread over
//!   the rayon thread pool

use gridsmith_core::{PuzzleKind, PuzzleSize};
use gridsmith_generator::{PuzzleGenerator, PuzzleRecord, PuzzleSeed};
use rayon::prelude::*;

pub mod inventory;
pub mod worker;

pub use self::{
    inventory::{Inventory, MemoryInventory, RefillSummary, refill},
    worker::{WorkError, WorkHandle, WorkRequest, WorkResponse, Worker},
};

/// Generates a batch, in parallel when `parallel` is set.
///
/// Every item is generated from its own seed derived from `seed`, so the
/// parallel batch is identical to the sequential one.
#[must_use]
pub fn generate_batch(
    generator: &PuzzleGenerator,
    kind: PuzzleKind,
    size: PuzzleSize,
    count: usize,
    seed: PuzzleSeed,
    parallel: bool,
) -> Vec<PuzzleRecord> {
    if !parallel {
        return generator.generate_with_seed(kind, size, count, seed);
    }
    let size = kind.normalize_size(size);
    log::debug!("generating {count} {kind} puzzle(s) of size {size} in parallel from seed {seed}");
    (0..count)
        .into_par_iter()
        .map(|index| generator.generate_one(kind, size, seed.derive(kind, size, index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_matches_sequential() {
        let generator = PuzzleGenerator::new();
        let seed = PuzzleSeed::new([6; 32]);
        for kind in [PuzzleKind::Nonogram, PuzzleKind::Sudoku] {
            let sequential = generate_batch(&generator, kind, PuzzleSize::Small, 4, seed, false);
            let parallel = generate_batch(&generator, kind, PuzzleSize::Small, 4, seed, true);
            assert_eq!(sequential.len(), 4);
            assert_eq!(sequential, parallel);
        }
    }

    #[test]
    fn test_parallel_zero_count() {
        let generator = PuzzleGenerator::new();
        let batch = generate_batch(
            &generator,
            PuzzleKind::Mosaic,
            PuzzleSize::Large,
            0,
            PuzzleSeed::random(),
            true,
        );
        assert!(batch.is_empty());
    }
}
