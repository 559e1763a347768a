//! Solution enumeration and constraint models for grid logic puzzles.
//!
//! # Overview
//!
//! - [`enumerator`]: the bounded depth-first [`Enumerator`] and the
//!   [`SearchSpace`] trait every puzzle model implements
//! - [`mosaic`], [`sudoku`]: models searched cell by cell against revealed
//!   clues
//! - [`nonogram`], [`nurikabe`]: models that propagate deductions after every
//!   decision and undo them from a trail on backtrack
//! - [`difficulty`]: pure classification of solve effort
//!
//! # Examples
//!
//! ```
//! use gridsmith_core::{Grid, RunConstraints};
//! use gridsmith_solver::{Enumerator, NonogramSolver};
//!
//! let fills = Grid::from_rows(vec![vec![true, false], vec![false, true]]);
//! let mut solver = NonogramSolver::new(&RunConstraints::from_grid(&fills));
//! solver.propagate()?;
//!
//! // Both diagonals fit the clues, so the nonogram is not unique.
//! let found = Enumerator::uniqueness().enumerate(&mut solver);
//! assert_eq!(found.len(), 2);
//! # Ok::<(), gridsmith_solver::Contradiction>(())
//! ```

pub mod difficulty;
pub mod enumerator;
pub mod mosaic;
pub mod nonogram;
pub mod nurikabe;
pub mod sudoku;

pub use self::{
    difficulty::Effort,
    enumerator::{Enumerator, Found, SearchBudget, SearchSpace},
    mosaic::MosaicSearch,
    nonogram::NonogramSolver,
    nurikabe::NurikabeSolver,
    sudoku::{SudokuBoard, SudokuSearch},
};

/// Error returned when propagation proves a state has no valid completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("constraints admit no completion")]
pub struct Contradiction;
