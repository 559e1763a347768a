//! Stock of ready puzzles, bucketed by kind, size and difficulty.

use std::collections::{HashMap, VecDeque};

use gridsmith_core::{Difficulty, Puzzle, PuzzleKind, PuzzleSize};

use crate::worker::{WorkError, Worker};

/// Puzzles kept per bucket by default.
pub const DEFAULT_CEILING: usize = 100;

/// Identifies one inventory bucket.
pub type Bucket = (PuzzleKind, PuzzleSize, Difficulty);

/// Storage for generated puzzles.
pub trait Inventory {
    /// Returns the number of puzzles held in `bucket`.
    fn count(&self, bucket: Bucket) -> usize;

    /// Stores `puzzle` if its bucket has room.
    ///
    /// # Errors
    ///
    /// Returns `Err(puzzle)` when the bucket is already at its ceiling.
    fn store(&mut self, puzzle: Puzzle) -> Result<(), Puzzle>;

    /// Removes and returns the oldest puzzle of `bucket`.
    fn take(&mut self, bucket: Bucket) -> Option<Puzzle>;
}

/// An in-memory [`Inventory`] with a per-bucket ceiling.
#[derive(Debug, Clone)]
pub struct MemoryInventory {
    ceiling: usize,
    buckets: HashMap<Bucket, VecDeque<Puzzle>>,
}

impl Default for MemoryInventory {
    fn default() -> Self {
        Self::with_ceiling(DEFAULT_CEILING)
    }
}

impl MemoryInventory {
    /// Creates an empty inventory with the default ceiling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty inventory holding at most `ceiling` puzzles per
    /// bucket.
    #[must_use]
    pub fn with_ceiling(ceiling: usize) -> Self {
        Self {
            ceiling,
            buckets: HashMap::new(),
        }
    }

    /// Returns the per-bucket ceiling.
    #[must_use]
    pub fn ceiling(&self) -> usize {
        self.ceiling
    }
}

fn bucket_of(puzzle: &Puzzle) -> Bucket {
    (puzzle.kind, puzzle.size, puzzle.difficulty)
}

impl Inventory for MemoryInventory {
    fn count(&self, bucket: Bucket) -> usize {
        self.buckets.get(&bucket).map_or(0, VecDeque::len)
    }

    fn store(&mut self, puzzle: Puzzle) -> Result<(), Puzzle> {
        let bucket = self.buckets.entry(bucket_of(&puzzle)).or_default();
        if bucket.len() >= self.ceiling {
            return Err(puzzle);
        }
        bucket.push_back(puzzle);
        Ok(())
    }

    fn take(&mut self, bucket: Bucket) -> Option<Puzzle> {
        self.buckets.get_mut(&bucket)?.pop_front()
    }
}

/// Number of puzzles requested per refill.
///
/// Nonograms are cheap to generate and often fall back, so they come in
/// larger batches.
#[must_use]
pub const fn batch_size(kind: PuzzleKind) -> usize {
    match kind {
        PuzzleKind::Nonogram => 100,
        PuzzleKind::Mosaic | PuzzleKind::Nurikabe | PuzzleKind::Sudoku => 5,
    }
}

/// What a [`refill`] did with its batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefillSummary {
    /// Puzzles stored.
    pub stored: usize,
    /// Puzzles dropped because their bucket was full.
    pub discarded: usize,
    /// Records that were errors instead of puzzles.
    pub failed: usize,
}

/// Requests one batch from `worker` and stores what fits.
///
/// # Errors
///
/// Returns an error if the worker cannot be reached.
pub fn refill<I>(
    inventory: &mut I,
    worker: &Worker,
    kind: PuzzleKind,
    size: PuzzleSize,
) -> Result<RefillSummary, WorkError>
where
    I: Inventory + ?Sized,
{
    let batch = worker.generate(kind, size, batch_size(kind), None)?;
    let mut summary = RefillSummary::default();
    for record in batch {
        match record {
            Ok(puzzle) => match inventory.store(puzzle) {
                Ok(()) => summary.stored += 1,
                Err(_) => summary.discarded += 1,
            },
            Err(err) => {
                log::debug!("skipping failed record: {err}");
                summary.failed += 1;
            }
        }
    }
    log::info!(
        "refilled {kind} {size}: {} stored, {} discarded, {} failed",
        summary.stored,
        summary.discarded,
        summary.failed
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use gridsmith_core::{Grid, NonogramCell, Shape};
    use gridsmith_generator::{GeneratorConfig, PuzzleGenerator};

    use super::*;

    fn puzzle(difficulty: Difficulty) -> Puzzle {
        let cells = Grid::filled(Shape::square(5), NonogramCell { filled: true });
        Puzzle::nonogram(PuzzleSize::Small, difficulty, cells)
    }

    #[test]
    fn test_store_respects_ceiling() {
        let mut inventory = MemoryInventory::with_ceiling(2);
        assert!(inventory.store(puzzle(Difficulty::Easy)).is_ok());
        assert!(inventory.store(puzzle(Difficulty::Easy)).is_ok());
        assert!(inventory.store(puzzle(Difficulty::Easy)).is_err());
        assert!(inventory.store(puzzle(Difficulty::Hard)).is_ok());

        let easy = (PuzzleKind::Nonogram, PuzzleSize::Small, Difficulty::Easy);
        assert_eq!(inventory.count(easy), 2);
        assert!(inventory.take(easy).is_some());
        assert_eq!(inventory.count(easy), 1);
        assert_eq!(
            inventory.count((PuzzleKind::Nonogram, PuzzleSize::Small, Difficulty::Medium)),
            0
        );
        assert!(
            inventory
                .take((PuzzleKind::Sudoku, PuzzleSize::Standard, Difficulty::Easy))
                .is_none()
        );
    }

    #[test]
    fn test_refill_skips_failures() {
        // Mosaics with no attempts always fail.
        let config = GeneratorConfig {
            mosaic_attempts: 0,
            ..GeneratorConfig::default()
        };
        let worker = Worker::new(PuzzleGenerator::with_config(config));
        let mut inventory = MemoryInventory::new();
        let summary = refill(&mut inventory, &worker, PuzzleKind::Mosaic, PuzzleSize::Small).unwrap();
        assert_eq!(
            summary,
            RefillSummary {
                stored: 0,
                discarded: 0,
                failed: 5,
            }
        );
    }

    #[test]
    fn test_refill_stores_up_to_ceiling() {
        // Nonograms with no attempts always yield the same fallback.
        let config = GeneratorConfig {
            nonogram_attempts: 0,
            ..GeneratorConfig::default()
        };
        let worker = Worker::new(PuzzleGenerator::with_config(config));
        let mut inventory = MemoryInventory::with_ceiling(30);
        let summary =
            refill(&mut inventory, &worker, PuzzleKind::Nonogram, PuzzleSize::Small).unwrap();
        assert_eq!(summary.stored, 30);
        assert_eq!(summary.discarded, 70);
        assert_eq!(
            inventory.count((PuzzleKind::Nonogram, PuzzleSize::Small, Difficulty::Easy)),
            30
        );
    }
}
