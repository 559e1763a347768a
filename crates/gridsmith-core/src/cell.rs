//! Per-kind cell records stored in a puzzle layout.
//!
//! Every cell carries the ground truth alongside the clue information that is
//! exposed to a solver. A consumer rendering the puzzle shows only the clue
//! part; the truth is kept so that answers can be checked.

use serde::{Deserialize, Serialize};

use crate::{Digit, Grid};

/// A mosaic cell.
///
/// `neighborhood_fill` counts the filled cells of the clipped 3×3 block
/// centred on this cell, the cell itself included. It is a clue only while
/// `revealed` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicCell {
    /// Whether the cell is filled in the solution.
    pub filled: bool,
    /// Number of filled cells in the cell's 3×3 block.
    pub neighborhood_fill: u8,
    /// Whether `neighborhood_fill` is shown to the solver.
    pub revealed: bool,
}

impl MosaicCell {
    /// Builds an unrevealed mosaic layout from a fill pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridsmith_core::{Grid, MosaicCell};
    ///
    /// let fills = Grid::from_rows(vec![vec![true, false], vec![false, true]]);
    /// let cells = MosaicCell::grid_from_fills(&fills);
    /// assert!(cells.iter().all(|cell| cell.neighborhood_fill == 2));
    /// assert!(cells.iter().all(|cell| !cell.revealed));
    /// ```
    #[must_use]
    pub fn grid_from_fills(fills: &Grid<bool>) -> Grid<Self> {
        let shape = fills.shape();
        Grid::from_fn(shape, |pos| {
            let count = shape.block(pos).filter(|&p| fills[p]).count();
            Self {
                filled: fills[pos],
                neighborhood_fill: u8::try_from(count).unwrap_or(u8::MAX),
                revealed: false,
            }
        })
    }
}

/// A nonogram cell. The clues live in the puzzle's run constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NonogramCell {
    /// Whether the cell is filled in the solution.
    pub filled: bool,
}

/// A nurikabe cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NurikabeCell {
    /// Whether the cell belongs to the river in the solution.
    pub river: bool,
    /// The island size shown on this cell, if it is the island's label.
    pub number: Option<u8>,
}

/// A sudoku cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SudokuCell {
    /// The digit in the solution.
    pub digit: Digit,
    /// Whether `digit` is shown to the solver.
    pub revealed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mosaic_counts_include_the_cell() {
        let fills = Grid::from_rows(vec![
            vec![true, true, false],
            vec![false, false, false],
            vec![false, false, true],
        ]);
        let cells = MosaicCell::grid_from_fills(&fills);
        let counts: Vec<u8> = cells.iter().map(|c| c.neighborhood_fill).collect();
        assert_eq!(counts, vec![2, 2, 1, 2, 3, 2, 0, 1, 1]);
        assert!(cells[0].filled);
        assert!(!cells[2].filled);
    }
}
