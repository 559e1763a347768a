//! Sudoku constraint model and search space.

use gridsmith_core::{Digit, DigitSet, Grid, Position, Shape, SudokuCell};

use crate::SearchSpace;

/// Side length of a sudoku grid.
pub const SIDE: usize = 9;

/// A partially filled sudoku board with per-house digit bookkeeping.
///
/// # Examples
///
/// ```
/// use gridsmith_core::Digit;
/// use gridsmith_solver::sudoku::SudokuBoard;
///
/// let mut board = SudokuBoard::new();
/// board.place(0, Digit::D5);
/// assert!(!board.can_place(8, Digit::D5)); // same row
/// assert!(!board.can_place(72, Digit::D5)); // same column
/// assert!(!board.can_place(10, Digit::D5)); // same box
/// assert!(board.can_place(40, Digit::D5));
/// assert_eq!(board.first_empty(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SudokuBoard {
    digits: [Option<Digit>; SIDE * SIDE],
    rows: [DigitSet; SIDE],
    columns: [DigitSet; SIDE],
    boxes: [DigitSet; SIDE],
}

impl Default for SudokuBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SudokuBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            digits: [None; SIDE * SIDE],
            rows: [DigitSet::EMPTY; SIDE],
            columns: [DigitSet::EMPTY; SIDE],
            boxes: [DigitSet::EMPTY; SIDE],
        }
    }

    #[inline]
    fn houses(cell: usize) -> (usize, usize, usize) {
        let (x, y) = (cell % SIDE, cell / SIDE);
        (y, x, (y / 3) * 3 + x / 3)
    }

    /// Returns the digit at `cell`, if any.
    #[must_use]
    pub fn get(&self, cell: usize) -> Option<Digit> {
        self.digits[cell]
    }

    /// Returns `true` if `cell` is empty and `digit` is absent from its row,
    /// column and box.
    #[must_use]
    pub fn can_place(&self, cell: usize, digit: Digit) -> bool {
        let (row, column, bx) = Self::houses(cell);
        self.digits[cell].is_none()
            && !(self.rows[row] | self.columns[column] | self.boxes[bx]).contains(digit)
    }

    /// Places `digit` at `cell` without checking the rules.
    pub fn place(&mut self, cell: usize, digit: Digit) {
        debug_assert!(self.digits[cell].is_none());
        let (row, column, bx) = Self::houses(cell);
        self.digits[cell] = Some(digit);
        self.rows[row].insert(digit);
        self.columns[column].insert(digit);
        self.boxes[bx].insert(digit);
    }

    /// Empties `cell`, returning the digit it held.
    pub fn clear(&mut self, cell: usize) -> Option<Digit> {
        let digit = self.digits[cell].take()?;
        let (row, column, bx) = Self::houses(cell);
        self.rows[row].remove(digit);
        self.columns[column].remove(digit);
        self.boxes[bx].remove(digit);
        Some(digit)
    }

    /// Returns the first empty cell in row-major order.
    #[must_use]
    pub fn first_empty(&self) -> Option<usize> {
        self.digits.iter().position(Option::is_none)
    }

    /// Returns the filled board as a grid, or `None` if a cell is empty.
    #[must_use]
    pub fn to_grid(&self) -> Option<Grid<Digit>> {
        let digits = self.digits.iter().copied().collect::<Option<Vec<_>>>()?;
        Some(Grid::new(Shape::square(SIDE), digits))
    }
}

/// Search space for a sudoku, seeded with its revealed digits.
#[derive(Debug, Clone)]
pub struct SudokuSearch<'a> {
    cells: &'a Grid<SudokuCell>,
    board: SudokuBoard,
}

impl<'a> SudokuSearch<'a> {
    /// Creates a search with the revealed cells of `cells` already placed.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is not 9×9.
    #[must_use]
    pub fn new(cells: &'a Grid<SudokuCell>) -> Self {
        assert_eq!(cells.shape(), Shape::square(SIDE), "sudoku must be 9x9");
        let mut board = SudokuBoard::new();
        for (i, cell) in cells.iter().enumerate() {
            if cell.revealed {
                board.place(i, cell.digit);
            }
        }
        Self { cells, board }
    }
}

impl SearchSpace for SudokuSearch<'_> {
    type Value = Digit;
    type Mark = usize;
    type Solution = Grid<Digit>;

    const VALUES: &'static [Digit] = &Digit::ALL;

    fn next_open(&self) -> Option<usize> {
        self.board.first_empty()
    }

    fn branch(&mut self, cell: usize, digit: Digit) -> Option<usize> {
        if !self.board.can_place(cell, digit) {
            return None;
        }
        self.board.place(cell, digit);
        Some(cell)
    }

    fn rollback(&mut self, cell: usize) {
        self.board.clear(cell);
    }

    fn matches_truth(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(i, cell)| self.board.get(i) == Some(cell.digit))
    }

    fn snapshot(&self) -> Grid<Digit> {
        let shape = self.cells.shape();
        Grid::from_fn(shape, |pos| {
            self.board
                .get(shape.index_of(pos))
                .unwrap_or(self.cells[pos].digit)
        })
    }
}

/// Returns `true` if every row, column and box of `grid` holds each digit
/// exactly once.
#[must_use]
pub fn is_valid_solution(grid: &Grid<Digit>) -> bool {
    if grid.shape() != Shape::square(SIDE) {
        return false;
    }
    let houses = (0..SIDE).flat_map(|h| {
        let row = (0..SIDE).map(move |i| Position::new(i, h));
        let column = (0..SIDE).map(move |i| Position::new(h, i));
        let bx = (0..SIDE).map(move |i| Position::new((h % 3) * 3 + i % 3, (h / 3) * 3 + i / 3));
        [
            row.collect::<Vec<_>>(),
            column.collect::<Vec<_>>(),
            bx.collect::<Vec<_>>(),
        ]
    });
    houses
        .map(|house| house.into_iter().map(|pos| grid[pos]).collect::<DigitSet>())
        .all(|set| set == DigitSet::FULL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Enumerator;

    fn pattern_solution() -> Grid<Digit> {
        Grid::from_fn(Shape::square(SIDE), |pos| {
            Digit::ALL[(pos.x() + pos.y() * 3 + pos.y() / 3) % 9]
        })
    }

    #[test]
    fn test_pattern_is_valid() {
        let grid = pattern_solution();
        assert!(is_valid_solution(&grid));
        let mut broken = grid.clone();
        broken[Position::new(0, 0)] = broken[Position::new(1, 0)];
        assert!(!is_valid_solution(&broken));
    }

    #[test]
    fn test_board_clear_restores_candidates() {
        let mut board = SudokuBoard::new();
        board.place(40, Digit::D9);
        assert!(!board.can_place(44, Digit::D9));
        assert_eq!(board.clear(40), Some(Digit::D9));
        assert!(board.can_place(44, Digit::D9));
        assert_eq!(board.clear(40), None);
    }

    #[test]
    fn test_one_hidden_cell_is_unique() {
        let mut cells = pattern_solution().map(|&digit| SudokuCell {
            digit,
            revealed: true,
        });
        cells[Position::new(4, 4)].revealed = false;
        let found = Enumerator::unbounded().enumerate(&mut SudokuSearch::new(&cells));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].solution, pattern_solution());
        assert_eq!(found[0].guesses, 1);
        let alternates = Enumerator::uniqueness()
            .excluding_truth()
            .enumerate(&mut SudokuSearch::new(&cells));
        assert!(alternates.is_empty());
    }

    #[test]
    fn test_swappable_rows_have_alternate() {
        // Two hidden rows of the same band can trade places.
        let solution = pattern_solution();
        let mut cells = solution.map(|&digit| SudokuCell {
            digit,
            revealed: true,
        });
        for x in 0..SIDE {
            cells[Position::new(x, 0)].revealed = false;
            cells[Position::new(x, 1)].revealed = false;
        }
        let alternates = Enumerator::uniqueness()
            .excluding_truth()
            .enumerate(&mut SudokuSearch::new(&cells));
        assert!(!alternates.is_empty());
        for found in &alternates {
            assert!(is_valid_solution(&found.solution));
            assert_ne!(found.solution, solution);
        }
    }
}
