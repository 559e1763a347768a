//! Fixed puzzles handed out when a generator runs out of attempts.

use gridsmith_core::{
    Difficulty, Grid, NonogramCell, NurikabeCell, Puzzle, PuzzleKind, PuzzleSize,
};

const NONOGRAM: [&str; 5] = ["#####", "#...#", "#.#.#", "#...#", "#####"];

const NURIKABE: [&str; 7] = [
    "~~~.2~5", "~1~~~~.", "~~.2~..", "1~~~~.~", "~~2.~~~", "2~~~~.~", ".~2.~2~",
];

/// Returns the fixed puzzle for `kind`, if it has one.
///
/// Mosaic and sudoku have no fallback; their exhaustion is reported as an
/// error instead.
#[must_use]
pub(crate) fn for_kind(kind: PuzzleKind) -> Option<Puzzle> {
    match kind {
        PuzzleKind::Nonogram => Some(nonogram()),
        PuzzleKind::Nurikabe => Some(nurikabe()),
        PuzzleKind::Mosaic | PuzzleKind::Sudoku => None,
    }
}

/// A small square frame with a dot in the middle.
pub(crate) fn nonogram() -> Puzzle {
    let cells = Grid::from_rows(
        NONOGRAM
            .iter()
            .map(|row| row.chars().map(|ch| NonogramCell { filled: ch == '#' }).collect())
            .collect(),
    );
    Puzzle::nonogram(PuzzleSize::Small, Difficulty::Easy, cells)
}

/// A medium nurikabe. `~` is river, `.` an unnumbered island cell.
pub(crate) fn nurikabe() -> Puzzle {
    let cells = Grid::from_rows(
        NURIKABE
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| NurikabeCell {
                        river: ch == '~',
                        number: ch
                            .to_digit(10)
                            .and_then(|d| u8::try_from(d).ok()),
                    })
                    .collect()
            })
            .collect(),
    );
    Puzzle::nurikabe(PuzzleSize::Medium, Difficulty::Medium, cells)
}
