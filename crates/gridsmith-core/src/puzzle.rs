//! The finished puzzle record handed to consumers.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{
    Difficulty, Grid, MosaicCell, NonogramCell, NurikabeCell, Position, PuzzleKind, PuzzleSize,
    RunConstraints, Shape, SudokuCell, region,
};

/// The cells of a puzzle, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Layout {
    /// Mosaic cells.
    Mosaic(Grid<MosaicCell>),
    /// Sudoku cells.
    Sudoku(Grid<SudokuCell>),
    /// Nurikabe cells.
    Nurikabe(Grid<NurikabeCell>),
    /// Nonogram cells.
    Nonogram(Grid<NonogramCell>),
}

impl Layout {
    /// Returns the kind of puzzle the cells belong to.
    #[must_use]
    pub fn kind(&self) -> PuzzleKind {
        match self {
            Self::Mosaic(_) => PuzzleKind::Mosaic,
            Self::Sudoku(_) => PuzzleKind::Sudoku,
            Self::Nurikabe(_) => PuzzleKind::Nurikabe,
            Self::Nonogram(_) => PuzzleKind::Nonogram,
        }
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Mosaic(grid) => grid.shape(),
            Self::Sudoku(grid) => grid.shape(),
            Self::Nurikabe(grid) => grid.shape(),
            Self::Nonogram(grid) => grid.shape(),
        }
    }
}

/// Kind-specific side data that is not stored per cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extra {
    /// The nonogram clues.
    Nonogram {
        /// One run-length clue per row.
        row_constraints: Vec<Vec<usize>>,
        /// One run-length clue per column.
        column_constraints: Vec<Vec<usize>>,
    },
    /// The nurikabe islands of the solution.
    Nurikabe {
        /// The cells of every island, in flood-fill order.
        islands: Vec<Vec<Position>>,
    },
}

/// A generated puzzle with a unique solution.
///
/// The layout holds both the ground truth and the clue information exposed
/// to a solver. Formatting with `{}` shows the clues, `{:#}` the solution.
///
/// # Examples
///
/// ```
/// use gridsmith_core::{Difficulty, Grid, NurikabeCell, Puzzle, PuzzleSize};
///
/// // 1#
/// // ##
/// let grid = Grid::from_rows(vec![
///     vec![NurikabeCell { river: false, number: Some(1) }, NurikabeCell { river: true, number: None }],
///     vec![NurikabeCell { river: true, number: None }, NurikabeCell { river: true, number: None }],
/// ]);
/// let puzzle = Puzzle::nurikabe(PuzzleSize::Small, Difficulty::Easy, grid);
/// assert_eq!(puzzle.to_string(), "1.\n..");
/// assert_eq!(format!("{puzzle:#}"), "1#\n##");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// The puzzle kind.
    #[serde(rename = "type")]
    pub kind: PuzzleKind,
    /// The size category.
    pub size: PuzzleSize,
    /// The difficulty category.
    pub difficulty: Difficulty,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// The cells, row-major.
    pub layout: Layout,
    /// Side data for nonogram and nurikabe, absent otherwise.
    pub extra: Option<Extra>,
}

impl Puzzle {
    fn from_layout(
        size: PuzzleSize,
        difficulty: Difficulty,
        layout: Layout,
        extra: Option<Extra>,
    ) -> Self {
        let shape = layout.shape();
        Self {
            kind: layout.kind(),
            size,
            difficulty,
            width: shape.width(),
            height: shape.height(),
            layout,
            extra,
        }
    }

    /// Creates a mosaic puzzle.
    #[must_use]
    pub fn mosaic(size: PuzzleSize, difficulty: Difficulty, cells: Grid<MosaicCell>) -> Self {
        Self::from_layout(size, difficulty, Layout::Mosaic(cells), None)
    }

    /// Creates a nonogram puzzle, deriving the run-length clues from the fills.
    #[must_use]
    pub fn nonogram(size: PuzzleSize, difficulty: Difficulty, cells: Grid<NonogramCell>) -> Self {
        let RunConstraints { rows, columns } =
            RunConstraints::from_grid(&cells.map(|cell| cell.filled));
        let extra = Extra::Nonogram {
            row_constraints: rows,
            column_constraints: columns,
        };
        Self::from_layout(size, difficulty, Layout::Nonogram(cells), Some(extra))
    }

    /// Creates a nurikabe puzzle, deriving the islands from the river.
    #[must_use]
    pub fn nurikabe(size: PuzzleSize, difficulty: Difficulty, cells: Grid<NurikabeCell>) -> Self {
        let shape = cells.shape();
        let islands = region::components(shape, |i| !cells[i].river)
            .into_iter()
            .map(|island| island.into_iter().map(|i| shape.position_of(i)).collect())
            .collect();
        let extra = Extra::Nurikabe { islands };
        Self::from_layout(size, difficulty, Layout::Nurikabe(cells), Some(extra))
    }

    /// Creates a sudoku puzzle. Sudoku is always recorded as
    /// [`PuzzleSize::Standard`].
    #[must_use]
    pub fn sudoku(difficulty: Difficulty, cells: Grid<SudokuCell>) -> Self {
        Self::from_layout(
            PuzzleSize::Standard,
            difficulty,
            Layout::Sudoku(cells),
            None,
        )
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn shape(&self) -> Shape {
        Shape::new(self.width, self.height)
    }

    /// Returns the number of per-cell clues shown to the solver.
    ///
    /// Nonogram clues are per line, so nonograms report zero.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        match &self.layout {
            Layout::Mosaic(grid) => grid.iter().filter(|c| c.revealed).count(),
            Layout::Sudoku(grid) => grid.iter().filter(|c| c.revealed).count(),
            Layout::Nurikabe(grid) => grid.iter().filter(|c| c.number.is_some()).count(),
            Layout::Nonogram(_) => 0,
        }
    }
}

fn write_rows<T>(
    f: &mut fmt::Formatter<'_>,
    grid: &Grid<T>,
    mut cell: impl FnMut(&T) -> String,
) -> fmt::Result {
    for (y, row) in grid.rows().enumerate() {
        if y > 0 {
            writeln!(f)?;
        }
        for value in row {
            write!(f, "{}", cell(value))?;
        }
    }
    Ok(())
}

fn join_runs(runs: &[usize]) -> String {
    if runs.is_empty() {
        return "0".to_owned();
    }
    runs.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = f.alternate();
        match &self.layout {
            Layout::Mosaic(grid) => write_rows(f, grid, |cell| match (solution, cell.revealed) {
                (true, _) if cell.filled => "#".to_owned(),
                (true, _) | (false, false) => ".".to_owned(),
                (false, true) => cell.neighborhood_fill.to_string(),
            }),
            Layout::Sudoku(grid) => write_rows(f, grid, |cell| {
                if solution || cell.revealed {
                    cell.digit.to_string()
                } else {
                    ".".to_owned()
                }
            }),
            Layout::Nurikabe(grid) => write_rows(f, grid, |cell| match cell.number {
                Some(number) => number.to_string(),
                None if solution && cell.river => "#".to_owned(),
                None => ".".to_owned(),
            }),
            Layout::Nonogram(grid) => {
                if solution {
                    return write_rows(f, grid, |cell| {
                        (if cell.filled { "#" } else { "." }).to_owned()
                    });
                }
                let Some(Extra::Nonogram {
                    row_constraints,
                    column_constraints,
                }) = &self.extra
                else {
                    return Ok(());
                };
                for (y, runs) in row_constraints.iter().enumerate() {
                    writeln!(f, "row {y}: {}", join_runs(runs))?;
                }
                for (x, runs) in column_constraints.iter().enumerate() {
                    if x > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "column {x}: {}", join_runs(runs))?;
                }
                Ok(())
            }
        }
    }
}
