//! Sudoku generation.

use gridsmith_core::{Digit, Grid, Puzzle, PuzzleKind, PuzzleSize, SudokuCell};
use gridsmith_solver::{Enumerator, SudokuBoard, SudokuSearch, difficulty};
use rand::{Rng, seq::SliceRandom as _};

use crate::{
    GeneratorConfig, PuzzleGenerator, PuzzleRecord,
    reveal::{RevealTarget, reveal_until_unique},
};

/// Generates `count` sudokus. Sudoku only comes in one size, so none is
/// requested.
#[must_use]
pub fn generate(count: usize) -> Vec<PuzzleRecord> {
    PuzzleGenerator::new().generate(PuzzleKind::Sudoku, PuzzleSize::Standard, count)
}

struct SudokuClues {
    cells: Grid<SudokuCell>,
}

impl RevealTarget for SudokuClues {
    type Alternate = Grid<Digit>;

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn is_revealed(&self, cell: usize) -> bool {
        self.cells[cell].revealed
    }

    fn reveal(&mut self, cell: usize) {
        self.cells[cell].revealed = true;
    }

    fn alternates(&self) -> Vec<Grid<Digit>> {
        Enumerator::uniqueness()
            .excluding_truth()
            .enumerate(&mut SudokuSearch::new(&self.cells))
            .into_iter()
            .map(|found| found.solution)
            .collect()
    }

    fn disagrees(&self, alternate: &Grid<Digit>, cell: usize) -> bool {
        alternate[cell] != self.cells[cell].digit
    }
}

fn fill<R>(board: &mut SudokuBoard, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    let Some(cell) = board.first_empty() else {
        return true;
    };
    let mut digits = Digit::ALL;
    digits.shuffle(rng);
    for digit in digits {
        if board.can_place(cell, digit) {
            board.place(cell, digit);
            if fill(board, rng) {
                return true;
            }
            board.clear(cell);
        }
    }
    false
}

/// Fills an empty board by randomized backtracking.
pub(crate) fn random_solution<R>(rng: &mut R) -> Option<Grid<Digit>>
where
    R: Rng + ?Sized,
{
    let mut board = SudokuBoard::new();
    if !fill(&mut board, rng) {
        return None;
    }
    board.to_grid()
}

/// Runs one full synthesis and clue placement.
pub(crate) fn attempt<R>(config: &GeneratorConfig, rng: &mut R) -> Option<Puzzle>
where
    R: Rng + ?Sized,
{
    let solution = random_solution(rng)?;
    let mut cells = solution.map(|&digit| SudokuCell {
        digit,
        revealed: false,
    });

    let mut order = (0..cells.len()).collect::<Vec<_>>();
    order.shuffle(rng);
    for &cell in order.iter().take(config.sudoku_seed_clues) {
        cells[cell].revealed = true;
    }

    let mut clues = SudokuClues { cells };
    if !reveal_until_unique(&mut clues, rng) {
        log::trace!("sudoku: clue placement stalled");
        return None;
    }
    let cells = clues.cells;
    let revealed = cells.iter().filter(|cell| cell.revealed).count();
    Some(Puzzle::sudoku(difficulty::sudoku(revealed), cells))
}

#[cfg(test)]
mod tests {
    use gridsmith_core::Layout;
    use gridsmith_solver::sudoku::is_valid_solution;

    use super::*;
    use crate::PuzzleSeed;

    #[test]
    fn test_random_solution_is_valid() {
        let mut rng = PuzzleSeed::new([5; 32]).rng();
        for _ in 0..5 {
            let grid = random_solution(&mut rng).unwrap();
            assert!(is_valid_solution(&grid));
        }
    }

    #[test]
    fn test_attempt_yields_unique_puzzle() {
        let config = GeneratorConfig::default();
        let mut rng = PuzzleSeed::new([9; 32]).rng();
        let puzzle = attempt(&config, &mut rng).expect("sudoku clue placement never stalls");
        assert_eq!(puzzle.size, PuzzleSize::Standard);
        assert!(puzzle.revealed_count() >= config.sudoku_seed_clues);
        let Layout::Sudoku(cells) = &puzzle.layout else {
            panic!("expected a sudoku layout");
        };
        let found = Enumerator::uniqueness().enumerate(&mut SudokuSearch::new(cells));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].solution, cells.map(|cell| cell.digit));
        assert_eq!(puzzle.difficulty, difficulty::sudoku(puzzle.revealed_count()));
    }
}
