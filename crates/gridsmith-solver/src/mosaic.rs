//! Mosaic constraint model and search space.

use gridsmith_core::{Grid, MosaicCell, Shape};

use crate::{Enumerator, SearchSpace};

/// Search space for a mosaic, constrained by its revealed clues.
///
/// Cells are decided in row-major order. Every decision updates the black and
/// white tallies of the blocks it belongs to; a value is rejected when it
/// would push a revealed block past its count of filled cells, or past its
/// count of empty cells.
#[derive(Debug, Clone)]
pub struct MosaicSearch<'a> {
    cells: &'a Grid<MosaicCell>,
    fills: Vec<Option<bool>>,
    black: Vec<u8>,
    white: Vec<u8>,
    block_size: Vec<u8>,
}

impl<'a> MosaicSearch<'a> {
    /// Creates an empty search over `cells`, using only the revealed counts.
    #[must_use]
    pub fn new(cells: &'a Grid<MosaicCell>) -> Self {
        let shape = cells.shape();
        let block_size = (0..shape.len())
            .map(|i| u8::try_from(shape.block_indices(i).count()).unwrap_or(u8::MAX))
            .collect();
        Self {
            cells,
            fills: vec![None; shape.len()],
            black: vec![0; shape.len()],
            white: vec![0; shape.len()],
            block_size,
        }
    }

    fn shape(&self) -> Shape {
        self.cells.shape()
    }

    fn permits(&self, cell: usize, value: bool) -> bool {
        self.shape().block_indices(cell).all(|n| {
            let clue = &self.cells[n];
            if !clue.revealed {
                return true;
            }
            if value {
                self.black[n] < clue.neighborhood_fill
            } else {
                self.white[n] < self.block_size[n] - clue.neighborhood_fill
            }
        })
    }
}

impl SearchSpace for MosaicSearch<'_> {
    type Value = bool;
    type Mark = (usize, bool);
    type Solution = Grid<bool>;

    const VALUES: &'static [bool] = &[true, false];

    fn next_open(&self) -> Option<usize> {
        self.fills.iter().position(Option::is_none)
    }

    fn branch(&mut self, cell: usize, value: bool) -> Option<(usize, bool)> {
        if !self.permits(cell, value) {
            return None;
        }
        self.fills[cell] = Some(value);
        let tally = if value {
            &mut self.black
        } else {
            &mut self.white
        };
        for n in self.cells.shape().block_indices(cell) {
            tally[n] += 1;
        }
        Some((cell, value))
    }

    fn rollback(&mut self, (cell, value): (usize, bool)) {
        self.fills[cell] = None;
        let tally = if value {
            &mut self.black
        } else {
            &mut self.white
        };
        for n in self.cells.shape().block_indices(cell) {
            tally[n] -= 1;
        }
    }

    fn is_solution(&self) -> bool {
        // Saturation pruning already forces equality once every cell is set.
        self.cells
            .iter()
            .zip(&self.black)
            .all(|(clue, &black)| !clue.revealed || black == clue.neighborhood_fill)
    }

    fn matches_truth(&self) -> bool {
        self.cells
            .iter()
            .zip(&self.fills)
            .all(|(cell, fill)| *fill == Some(cell.filled))
    }

    fn snapshot(&self) -> Grid<bool> {
        Grid::new(
            self.shape(),
            self.fills.iter().map(|fill| *fill == Some(true)).collect(),
        )
    }
}

/// Returns `true` if the revealed clues of `cells` admit exactly one fill.
#[must_use]
pub fn is_unique(cells: &Grid<MosaicCell>) -> bool {
    Enumerator::uniqueness()
        .enumerate(&mut MosaicSearch::new(cells))
        .len()
        == 1
}

/// Returns up to two fills, other than the ground truth, that agree with the
/// revealed clues of `cells`.
#[must_use]
pub fn alternates(cells: &Grid<MosaicCell>) -> Vec<Grid<bool>> {
    Enumerator::uniqueness()
        .excluding_truth()
        .enumerate(&mut MosaicSearch::new(cells))
        .into_iter()
        .map(|found| found.solution)
        .collect()
}
