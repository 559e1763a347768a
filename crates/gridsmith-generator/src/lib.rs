//! Puzzle generation with guaranteed unique solutions.
//!
//! Every generated puzzle has been checked by the solvers in
//! [`gridsmith_solver`]: its clues admit exactly one solution, and that
//! solution is the ground truth stored in the puzzle.
//!
//! # Overview
//!
//! - [`PuzzleGenerator`]: the batch driver, parameterised by a
//!   [`GeneratorConfig`]
//! - [`PuzzleSeed`]: a reproducible 256-bit seed
//! - [`mosaic`], [`nonogram`], [`nurikabe`], [`sudoku`]: per-kind entry points
//!   using the default configuration
//!
//! Generation is best effort. Each puzzle gets a fixed number of attempts;
//! when they run out, nonograms and nurikabes fall back to a fixed puzzle and
//! mosaics and sudokus report [`GenerateError::Exhausted`].
//!
//! # Examples
//!
//! ```
//! use gridsmith_core::{PuzzleKind, PuzzleSize};
//! use gridsmith_generator::{PuzzleGenerator, PuzzleSeed};
//!
//! let seed = PuzzleSeed::new([7; 32]);
//! let generator = PuzzleGenerator::new();
//! let batch = generator.generate_with_seed(PuzzleKind::Nonogram, PuzzleSize::Small, 2, seed);
//! assert_eq!(batch.len(), 2);
//! for puzzle in batch {
//!     let puzzle = puzzle.unwrap();
//!     assert_eq!((puzzle.width, puzzle.height), (5, 5));
//! }
//! ```

use gridsmith_core::{Puzzle, PuzzleKind, PuzzleSize};
use serde::{Deserialize, Serialize};

pub use self::{
    config::GeneratorConfig,
    seed::{ParseSeedError, PuzzleSeed},
};

mod config;
mod fallback;
pub mod mosaic;
pub mod nonogram;
pub mod nurikabe;
mod reveal;
mod seed;
pub mod sudoku;

/// Outcome of generating one puzzle.
pub type PuzzleRecord = Result<Puzzle, GenerateError>;

/// Error returned in place of a puzzle that could not be generated.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, Serialize, Deserialize,
)]
pub enum GenerateError {
    /// Every attempt was rejected and the kind has no fallback puzzle.
    #[display("no unique {kind} puzzle of size {size} after {attempts} attempts")]
    Exhausted {
        /// Requested kind.
        kind: PuzzleKind,
        /// Requested size.
        size: PuzzleSize,
        /// Attempts made.
        attempts: usize,
    },
}

/// Generates batches of puzzles.
#[derive(Debug, Clone, Default)]
pub struct PuzzleGenerator {
    config: GeneratorConfig,
}

impl PuzzleGenerator {
    /// Creates a generator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with a custom configuration.
    #[must_use]
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates `count` puzzles from a fresh random seed.
    ///
    /// Sudoku ignores `size`. The result always holds exactly `count`
    /// records, in request order.
    #[must_use]
    pub fn generate(&self, kind: PuzzleKind, size: PuzzleSize, count: usize) -> Vec<PuzzleRecord> {
        self.generate_with_seed(kind, size, count, PuzzleSeed::random())
    }

    /// Generates `count` puzzles reproducibly from `seed`.
    ///
    /// The `i`-th record depends only on `seed`, `kind`, `size` and `i`, so
    /// the same call always yields the same batch and a batch of `n` is a
    /// prefix of a batch of `n + 1`.
    #[must_use]
    pub fn generate_with_seed(
        &self,
        kind: PuzzleKind,
        size: PuzzleSize,
        count: usize,
        seed: PuzzleSeed,
    ) -> Vec<PuzzleRecord> {
        if count == 0 {
            return vec![];
        }
        let size = kind.normalize_size(size);
        log::debug!("generating {count} {kind} puzzle(s) of size {size} from seed {seed}");
        (0..count)
            .map(|index| self.generate_one(kind, size, seed.derive(kind, size, index)))
            .collect()
    }

    /// Generates a single puzzle from an already derived seed.
    ///
    /// When every attempt is rejected, nonograms and nurikabes fall back to a
    /// fixed puzzle of its own size, so the returned record's `size` may
    /// differ from `size`. Other kinds return [`GenerateError::Exhausted`].
    pub fn generate_one(&self, kind: PuzzleKind, size: PuzzleSize, seed: PuzzleSeed) -> PuzzleRecord {
        let size = kind.normalize_size(size);
        let mut rng = seed.rng();
        let attempts = self.config.attempts(kind);
        for attempt in 1..=attempts {
            let puzzle = match kind {
                PuzzleKind::Mosaic => mosaic::attempt(size, &self.config, &mut rng),
                PuzzleKind::Nonogram => nonogram::attempt(size, &self.config, &mut rng),
                PuzzleKind::Nurikabe => nurikabe::attempt(size, &self.config, &mut rng),
                PuzzleKind::Sudoku => sudoku::attempt(&self.config, &mut rng),
            };
            if let Some(puzzle) = puzzle {
                log::trace!(
                    "{kind} {size}: accepted on attempt {attempt} as {}",
                    puzzle.difficulty
                );
                return Ok(puzzle);
            }
        }

        log::debug!("{kind} {size}: all {attempts} attempts rejected");
        if let Some(puzzle) = fallback::for_kind(kind) {
            log::warn!(
                "{kind} {size}: substituting the fixed {} fallback puzzle",
                puzzle.size
            );
            return Ok(puzzle);
        }
        log::warn!("{kind} {size}: no puzzle after {attempts} attempts");
        Err(GenerateError::Exhausted {
            kind,
            size,
            attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use gridsmith_core::{Extra, Layout, RunConstraints, region};
    use gridsmith_solver::{
        Enumerator, MosaicSearch, NonogramSolver, NurikabeSolver, SudokuSearch,
        nurikabe::is_valid_cells, sudoku::is_valid_solution,
    };
    use proptest::prelude::*;

    use super::*;

    /// Checks that the exposed clues admit exactly the stored ground truth.
    fn assert_unique(puzzle: &Puzzle) {
        match &puzzle.layout {
            Layout::Mosaic(cells) => {
                let found = Enumerator::unbounded().enumerate(&mut MosaicSearch::new(cells));
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].solution, cells.map(|cell| cell.filled));
                let shape = cells.shape();
                for (i, cell) in cells.iter().enumerate() {
                    let fill = shape.block_indices(i).filter(|&n| cells[n].filled).count();
                    assert_eq!(usize::from(cell.neighborhood_fill), fill);
                }
            }
            Layout::Nonogram(cells) => {
                let fills = cells.map(|cell| cell.filled);
                let Some(Extra::Nonogram {
                    row_constraints,
                    column_constraints,
                }) = &puzzle.extra
                else {
                    panic!("nonogram without run constraints");
                };
                let constraints = RunConstraints {
                    rows: row_constraints.clone(),
                    columns: column_constraints.clone(),
                };
                assert_eq!(RunConstraints::from_grid(&fills), constraints);
                let found = Enumerator::unbounded().enumerate(&mut NonogramSolver::new(&constraints));
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].solution, fills);
            }
            Layout::Nurikabe(cells) => {
                assert!(is_valid_cells(cells));
                let Some(Extra::Nurikabe { islands }) = &puzzle.extra else {
                    panic!("nurikabe without islands");
                };
                let shape = cells.shape();
                let flooded = region::components(shape, |i| !cells[i].river);
                assert_eq!(flooded.len(), islands.len());
                for (island, cells_of) in islands.iter().zip(&flooded) {
                    let indices = island.iter().map(|&pos| shape.index_of(pos)).collect::<Vec<_>>();
                    assert_eq!(&indices, cells_of);
                }
                let found = Enumerator::unbounded().enumerate(&mut NurikabeSolver::from_cells(cells));
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].solution, cells.map(|cell| cell.river));
            }
            Layout::Sudoku(cells) => {
                let truth = cells.map(|cell| cell.digit);
                assert!(is_valid_solution(&truth));
                let found = Enumerator::unbounded().enumerate(&mut SudokuSearch::new(cells));
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].solution, truth);
            }
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let generator = PuzzleGenerator::new();
        for kind in PuzzleKind::ALL {
            assert!(generator.generate(kind, PuzzleSize::Large, 0).is_empty());
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        let generator = PuzzleGenerator::new();
        let seed = PuzzleSeed::new([42; 32]);
        let a = generator.generate_with_seed(PuzzleKind::Mosaic, PuzzleSize::Small, 3, seed);
        let b = generator.generate_with_seed(PuzzleKind::Mosaic, PuzzleSize::Small, 2, seed);
        assert_eq!(a.len(), 3);
        assert_eq!(&a[..2], &b[..]);
    }

    #[test]
    fn test_sudoku_ignores_size() {
        let generator = PuzzleGenerator::new();
        let seed = PuzzleSeed::new([3; 32]);
        let small = generator.generate_with_seed(PuzzleKind::Sudoku, PuzzleSize::Small, 1, seed);
        let large = generator.generate_with_seed(PuzzleKind::Sudoku, PuzzleSize::Large, 1, seed);
        assert_eq!(small, large);
        let puzzle = small[0].as_ref().unwrap();
        assert_eq!(puzzle.size, PuzzleSize::Standard);
        assert_eq!((puzzle.width, puzzle.height), (9, 9));
    }

    #[test]
    fn test_exhaustion_falls_back_or_errors() {
        let config = GeneratorConfig {
            mosaic_attempts: 0,
            nonogram_attempts: 0,
            nurikabe_attempts: 0,
            sudoku_attempts: 0,
            ..GeneratorConfig::default()
        };
        let generator = PuzzleGenerator::with_config(config);
        let seed = PuzzleSeed::new([0; 32]);

        let nonogram = generator.generate_one(PuzzleKind::Nonogram, PuzzleSize::Large, seed);
        assert_eq!(nonogram, Ok(fallback::nonogram()));
        // The fallback keeps its own size rather than the requested one.
        assert_eq!(nonogram.map(|puzzle| puzzle.size), Ok(PuzzleSize::Small));
        let nurikabe = generator.generate_one(PuzzleKind::Nurikabe, PuzzleSize::Small, seed);
        assert_eq!(nurikabe, Ok(fallback::nurikabe()));

        let mosaic = generator.generate_one(PuzzleKind::Mosaic, PuzzleSize::Medium, seed);
        assert_eq!(
            mosaic,
            Err(GenerateError::Exhausted {
                kind: PuzzleKind::Mosaic,
                size: PuzzleSize::Medium,
                attempts: 0,
            })
        );
        let sudoku = generator.generate_one(PuzzleKind::Sudoku, PuzzleSize::Small, seed);
        assert_eq!(
            sudoku.unwrap_err().to_string(),
            "no unique sudoku puzzle of size standard after 0 attempts"
        );
    }

    #[test]
    fn test_entry_points_fill_the_batch() {
        assert_eq!(mosaic::generate(PuzzleSize::Small, 1).len(), 1);
        assert_eq!(nonogram::generate(PuzzleSize::Small, 2).len(), 2);
        assert_eq!(nurikabe::generate(PuzzleSize::Small, 1).len(), 1);
        assert_eq!(sudoku::generate(1).len(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn test_generated_puzzles_are_unique(
            bytes in any::<[u8; 32]>(),
            kind in prop::sample::select(PuzzleKind::ALL.to_vec()),
        ) {
            let generator = PuzzleGenerator::new();
            let size = kind.normalize_size(PuzzleSize::Small);
            let record = generator.generate_one(kind, size, PuzzleSeed::new(bytes));
            if let Ok(puzzle) = record {
                prop_assert_eq!(puzzle.kind, kind);
                prop_assert_eq!(puzzle.layout.kind(), kind);
                if puzzle.size == size {
                    assert_unique(&puzzle);
                }
            }
        }
    }
}
