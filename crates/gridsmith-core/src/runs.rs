//! Run-length extraction for nonogram clues.

use serde::{Deserialize, Serialize};

use crate::Grid;

/// Returns the lengths of the maximal runs of `true` in `line`, in order.
///
/// An empty line or a line without filled cells yields an empty clue.
///
/// # Examples
///
/// ```
/// use gridsmith_core::runs::run_lengths;
///
/// assert_eq!(run_lengths([true, true, false, true]), vec![2, 1]);
/// assert!(run_lengths([false, false]).is_empty());
/// ```
pub fn run_lengths<I>(line: I) -> Vec<usize>
where
    I: IntoIterator<Item = bool>,
{
    let mut runs = vec![];
    let mut current = 0;
    for filled in line {
        if filled {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}

/// Row and column run-length constraints of a nonogram.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunConstraints {
    /// One clue per row, top to bottom.
    pub rows: Vec<Vec<usize>>,
    /// One clue per column, left to right.
    pub columns: Vec<Vec<usize>>,
}

impl RunConstraints {
    /// Extracts the constraints of a fill pattern.
    #[must_use]
    pub fn from_grid(grid: &Grid<bool>) -> Self {
        let rows = grid
            .rows()
            .map(|row| run_lengths(row.iter().copied()))
            .collect();
        let columns = (0..grid.width())
            .map(|x| run_lengths(grid.column(x).copied()))
            .collect();
        Self { rows, columns }
    }

    /// Returns `true` if `grid` satisfies every row and column clue.
    #[must_use]
    pub fn is_satisfied_by(&self, grid: &Grid<bool>) -> bool {
        Self::from_grid(grid) == *self
    }
}
