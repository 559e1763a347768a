//! Difficulty classification from observed solve effort.
//!
//! Every function here is pure: the same effort always maps to the same
//! [`Difficulty`].

use gridsmith_core::{Difficulty, PuzzleKind, PuzzleSize};

/// What it took to prove a puzzle's solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effort {
    /// Reveal-based clueing ended with `clues` revealed cells out of `cells`.
    Reveals {
        /// Revealed clue cells.
        clues: usize,
        /// Total cells.
        cells: usize,
    },
    /// Propagation alone completed the grid in `steps` rounds.
    Propagation {
        /// Propagation rounds until fixpoint.
        steps: usize,
    },
    /// Search was needed; the unique solution sat `guesses` decisions deep.
    Backtracking {
        /// Branch decisions on the path to the solution.
        guesses: usize,
    },
}

/// Classifies a mosaic by its share of revealed clues.
///
/// Below half is hard, below 56% is medium, anything else is easy.
///
/// # Examples
///
/// ```
/// use gridsmith_core::Difficulty;
/// use gridsmith_solver::difficulty;
///
/// assert_eq!(difficulty::mosaic(12, 25), Difficulty::Hard);
/// assert_eq!(difficulty::mosaic(13, 25), Difficulty::Medium);
/// assert_eq!(difficulty::mosaic(14, 25), Difficulty::Easy);
/// ```
#[must_use]
pub fn mosaic(clues: usize, cells: usize) -> Difficulty {
    if 2 * clues < cells {
        Difficulty::Hard
    } else if 100 * clues < 56 * cells {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    }
}

/// Classifies a sudoku by its clue count.
#[must_use]
pub fn sudoku(clues: usize) -> Difficulty {
    match clues {
        ..31 => Difficulty::Hard,
        31..33 => Difficulty::Medium,
        _ => Difficulty::Easy,
    }
}

/// Classifies a nonogram.
///
/// A propagation solve is easy up to a per-size step count and medium past
/// it; any backtracking makes it hard.
#[must_use]
pub fn nonogram(size: PuzzleSize, effort: Effort) -> Difficulty {
    match effort {
        Effort::Propagation { steps } => {
            let easy_steps = match size {
                PuzzleSize::Small | PuzzleSize::Standard => 4,
                PuzzleSize::Medium => 8,
                PuzzleSize::Large => 11,
            };
            if steps <= easy_steps {
                Difficulty::Easy
            } else {
                Difficulty::Medium
            }
        }
        Effort::Backtracking { .. } | Effort::Reveals { .. } => Difficulty::Hard,
    }
}

/// Classifies a nurikabe.
///
/// A propagation solve is easy; otherwise a few guesses are medium and more
/// are hard.
#[must_use]
pub fn nurikabe(size: PuzzleSize, effort: Effort) -> Difficulty {
    match effort {
        Effort::Propagation { .. } => Difficulty::Easy,
        Effort::Backtracking { guesses } => {
            let medium_guesses = match size {
                PuzzleSize::Small | PuzzleSize::Standard => 2,
                PuzzleSize::Medium | PuzzleSize::Large => 3,
            };
            if guesses <= medium_guesses {
                Difficulty::Medium
            } else {
                Difficulty::Hard
            }
        }
        Effort::Reveals { .. } => Difficulty::Hard,
    }
}

/// Classifies a puzzle of any kind.
///
/// Reveal effort is only meaningful for mosaic and sudoku; propagation and
/// backtracking effort only for nonogram and nurikabe. Mismatched pairs
/// classify as hard.
#[must_use]
pub fn classify(kind: PuzzleKind, size: PuzzleSize, effort: Effort) -> Difficulty {
    match (kind, effort) {
        (PuzzleKind::Mosaic, Effort::Reveals { clues, cells }) => mosaic(clues, cells),
        (PuzzleKind::Sudoku, Effort::Reveals { clues, .. }) => sudoku(clues),
        (PuzzleKind::Nonogram, effort) => nonogram(size, effort),
        (PuzzleKind::Nurikabe, effort) => nurikabe(size, effort),
        (PuzzleKind::Mosaic | PuzzleKind::Sudoku, _) => Difficulty::Hard,
    }
}
