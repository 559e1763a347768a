//! Core data structures for grid logic puzzles.
//!
//! This crate provides the types shared by the solving and generation crates:
//! coordinates, row-major grids, the puzzle taxonomy and the finished puzzle
//! record handed to consumers.
//!
//! # Overview
//!
//! 1. **Geometry** - where cells live
//!    - [`shape`]: [`Position`] and [`Shape`], including 4-neighborhood and 3×3
//!      block iteration
//!    - [`grid`]: [`Grid`], a row-major container indexed by [`Position`]
//!    - [`region`]: connected-component flood fill over a [`Shape`]
//!
//! 2. **Values** - what cells hold
//!    - [`digit`]: type-safe sudoku digits 1-9
//!    - [`digit_set`]: a bitset of digits used for row/column/box bookkeeping
//!    - [`runs`]: run-length extraction for nonogram clues
//!
//! 3. **Puzzles** - what generators produce
//!    - [`taxonomy`]: [`PuzzleKind`], [`PuzzleSize`] and [`Difficulty`]
//!    - [`cell`]: the per-kind cell records
//!    - [`puzzle`]: the [`Puzzle`] record with its [`Layout`] and [`Extra`] data
//!
//! # Examples
//!
//! ```
//! use gridsmith_core::{Grid, NonogramCell, Puzzle, PuzzleKind, PuzzleSize};
//!
//! let (width, height) = PuzzleKind::Nonogram.dimensions(PuzzleSize::Small);
//! let grid = Grid::from_fn(gridsmith_core::Shape::new(width, height), |pos| {
//!     NonogramCell { filled: pos.x() == pos.y() }
//! });
//! let puzzle = Puzzle::nonogram(PuzzleSize::Small, gridsmith_core::Difficulty::Easy, grid);
//! assert_eq!(puzzle.width, 5);
//! assert!(puzzle.extra.is_some());
//! ```

pub mod cell;
pub mod digit;
pub mod digit_set;
pub mod grid;
pub mod puzzle;
pub mod region;
pub mod runs;
pub mod shape;
pub mod taxonomy;

// Re-export commonly used types
pub use self::{
    cell::{MosaicCell, NonogramCell, NurikabeCell, SudokuCell},
    digit::Digit,
    digit_set::DigitSet,
    grid::{Grid, GridShapeError},
    puzzle::{Extra, Layout, Puzzle},
    runs::RunConstraints,
    shape::{Position, Shape},
    taxonomy::{
        Difficulty, ParseDifficultyError, ParseKindError, ParseSizeError, PuzzleKind, PuzzleSize,
    },
};
