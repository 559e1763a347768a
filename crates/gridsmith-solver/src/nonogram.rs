//! Nonogram line propagation and search space.
//!
//! Each row and column keeps the list of run placements still compatible with
//! the fixed cells. Propagation alternates two moves until nothing changes:
//! cells that every surviving placement of a line agrees on are fixed, then
//! placements that contradict a fixed cell are discarded.

use gridsmith_core::{Grid, RunConstraints, Shape};

use crate::{Contradiction, SearchSpace};

/// Enumerates every placement of `clue` in a line of `len` cells.
///
/// Bit `i` of a placement is set when cell `i` is filled. Runs are separated
/// by at least one empty cell; an empty clue has the single all-empty
/// placement.
///
/// # Examples
///
/// ```
/// use gridsmith_solver::nonogram::line_options;
///
/// assert_eq!(line_options(&[2], 3), vec![0b011, 0b110]);
/// assert_eq!(line_options(&[1, 1], 3), vec![0b101]);
/// assert_eq!(line_options(&[], 4), vec![0]);
/// assert!(line_options(&[3], 2).is_empty());
/// ```
#[must_use]
pub fn line_options(clue: &[usize], len: usize) -> Vec<u32> {
    debug_assert!(len <= 32);
    let mut options = vec![];
    place_runs(clue, len, 0, 0, &mut options);
    options
}

fn place_runs(clue: &[usize], len: usize, start: usize, acc: u32, out: &mut Vec<u32>) {
    let Some((&run, rest)) = clue.split_first() else {
        out.push(acc);
        return;
    };
    let reserved = rest.iter().sum::<usize>() + rest.len() + run;
    let Some(last_start) = len.checked_sub(reserved) else {
        return;
    };
    let run_bits = if run >= 32 { u32::MAX } else { (1 << run) - 1 };
    for s in start..=last_start {
        place_runs(rest, len, s + run + 1, acc | (run_bits << s), out);
    }
}

/// Placements of one line; `options[..alive]` are still possible.
#[derive(Debug, Clone)]
struct LineOptions {
    options: Vec<u32>,
    alive: usize,
}

impl LineOptions {
    fn new(options: Vec<u32>) -> Self {
        let alive = options.len();
        Self { options, alive }
    }

    fn live(&self) -> &[u32] {
        &self.options[..self.alive]
    }

    /// Returns the cells filled by every live placement and the cells
    /// filled by at least one.
    fn overlap(&self) -> (u32, u32) {
        self.live()
            .iter()
            .fold((u32::MAX, 0), |(and, or), &opt| (and & opt, or | opt))
    }

    fn permits(&self, bit: usize, value: bool) -> bool {
        self.live()
            .iter()
            .any(|&opt| (opt >> bit) & 1 == u32::from(value))
    }

    /// Drops live placements that disagree with `value` on the `known` bits.
    /// Swapped-out placements stay past `alive`, so restoring the count undoes
    /// the removal.
    fn retain(&mut self, known: u32, value: u32) -> usize {
        let before = self.alive;
        let mut i = 0;
        while i < self.alive {
            if (self.options[i] ^ value) & known == 0 {
                i += 1;
            } else {
                self.alive -= 1;
                self.options.swap(i, self.alive);
            }
        }
        before - self.alive
    }
}

#[derive(Debug, Clone, Copy)]
enum Line {
    Row(usize),
    Column(usize),
}

#[derive(Debug, Clone, Copy)]
enum Change {
    Cell(usize),
    Alive { line: Line, alive: usize },
}

/// Propagating solver and search space for a nonogram.
///
/// # Examples
///
/// ```
/// use gridsmith_core::{Grid, RunConstraints};
/// use gridsmith_solver::NonogramSolver;
///
/// let fills = Grid::from_rows(vec![
///     vec![true, true, true],
///     vec![true, false, true],
///     vec![true, true, true],
/// ]);
/// let mut solver = NonogramSolver::new(&RunConstraints::from_grid(&fills));
/// let steps = solver.propagate()?;
/// assert!(solver.is_complete());
/// assert!(steps >= 1);
/// assert_eq!(solver.to_grid(), Some(fills));
/// # Ok::<(), gridsmith_solver::Contradiction>(())
/// ```
#[derive(Debug, Clone)]
pub struct NonogramSolver {
    shape: Shape,
    constraints: RunConstraints,
    cells: Vec<Option<bool>>,
    rows: Vec<LineOptions>,
    columns: Vec<LineOptions>,
    trail: Vec<Change>,
}

impl NonogramSolver {
    /// Creates a solver with every cell open.
    #[must_use]
    pub fn new(constraints: &RunConstraints) -> Self {
        let shape = Shape::new(constraints.columns.len(), constraints.rows.len());
        let rows = constraints
            .rows
            .iter()
            .map(|clue| LineOptions::new(line_options(clue, shape.width())))
            .collect();
        let columns = constraints
            .columns
            .iter()
            .map(|clue| LineOptions::new(line_options(clue, shape.height())))
            .collect();
        Self {
            shape,
            constraints: constraints.clone(),
            cells: vec![None; shape.len()],
            rows,
            columns,
            trail: vec![],
        }
    }

    /// Returns `true` once every cell is fixed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns the fixed grid, or `None` while a cell is open.
    #[must_use]
    pub fn to_grid(&self) -> Option<Grid<bool>> {
        let cells = self.cells.iter().copied().collect::<Option<Vec<_>>>()?;
        Some(Grid::new(self.shape, cells))
    }

    fn line(&self, line: Line) -> &LineOptions {
        match line {
            Line::Row(y) => &self.rows[y],
            Line::Column(x) => &self.columns[x],
        }
    }

    fn line_mut(&mut self, line: Line) -> &mut LineOptions {
        match line {
            Line::Row(y) => &mut self.rows[y],
            Line::Column(x) => &mut self.columns[x],
        }
    }

    fn line_cells(&self, line: Line) -> Vec<usize> {
        let width = self.shape.width();
        match line {
            Line::Row(y) => (0..width).map(|x| y * width + x).collect(),
            Line::Column(x) => (0..self.shape.height()).map(|y| y * width + x).collect(),
        }
    }

    fn lines(&self) -> impl Iterator<Item = Line> + use<> {
        let rows = (0..self.shape.height()).map(Line::Row);
        let columns = (0..self.shape.width()).map(Line::Column);
        rows.chain(columns)
    }

    fn fix(&mut self, cell: usize, value: bool) -> Result<bool, Contradiction> {
        match self.cells[cell] {
            None => {
                self.cells[cell] = Some(value);
                self.trail.push(Change::Cell(cell));
                Ok(true)
            }
            Some(fixed) if fixed == value => Ok(false),
            Some(_) => Err(Contradiction),
        }
    }

    fn fix_overlaps(&mut self) -> Result<(), Contradiction> {
        for line in self.lines() {
            let (all, any) = self.line(line).overlap();
            for (bit, cell) in self.line_cells(line).into_iter().enumerate() {
                if (all >> bit) & 1 == 1 {
                    self.fix(cell, true)?;
                } else if (any >> bit) & 1 == 0 {
                    self.fix(cell, false)?;
                }
            }
        }
        Ok(())
    }

    fn eliminate(&mut self) -> Result<usize, Contradiction> {
        let mut removed = 0;
        for line in self.lines() {
            let (mut known, mut value) = (0, 0);
            for (bit, cell) in self.line_cells(line).into_iter().enumerate() {
                if let Some(filled) = self.cells[cell] {
                    known |= 1 << bit;
                    value |= u32::from(filled) << bit;
                }
            }
            let alive = self.line(line).alive;
            let dropped = self.line_mut(line).retain(known, value);
            if dropped > 0 {
                self.trail.push(Change::Alive { line, alive });
                removed += dropped;
            }
            if self.line(line).alive == 0 {
                return Err(Contradiction);
            }
        }
        Ok(removed)
    }

    /// Runs line propagation to a fixpoint.
    ///
    /// Returns the number of rounds taken; a round fixes overlapping cells and
    /// then discards contradicted placements, and the last round is the one
    /// that discards nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Contradiction`] if a line runs out of placements or a cell is
    /// forced both ways. Changes made before the contradiction stay on the
    /// trail.
    pub fn propagate(&mut self) -> Result<usize, Contradiction> {
        if self.lines().any(|line| self.line(line).alive == 0) {
            return Err(Contradiction);
        }
        let mut steps = 0;
        loop {
            steps += 1;
            self.fix_overlaps()?;
            if self.eliminate()? == 0 {
                break;
            }
        }
        log::trace!("nonogram propagation settled after {steps} steps");
        Ok(steps)
    }
}

impl SearchSpace for NonogramSolver {
    type Value = bool;
    type Mark = usize;
    type Solution = Grid<bool>;

    const VALUES: &'static [bool] = &[true, false];

    fn next_open(&self) -> Option<usize> {
        self.cells.iter().position(Option::is_none)
    }

    fn branch(&mut self, cell: usize, value: bool) -> Option<usize> {
        let (x, y) = (cell % self.shape.width(), cell / self.shape.width());
        if !self.rows[y].permits(x, value) || !self.columns[x].permits(y, value) {
            return None;
        }
        let mark = self.trail.len();
        if self.fix(cell, value).is_err() || self.propagate().is_err() {
            self.rollback(mark);
            return None;
        }
        Some(mark)
    }

    fn rollback(&mut self, mark: usize) {
        while self.trail.len() > mark {
            match self.trail.pop() {
                Some(Change::Cell(cell)) => self.cells[cell] = None,
                Some(Change::Alive { line, alive }) => self.line_mut(line).alive = alive,
                None => break,
            }
        }
    }

    fn is_solution(&self) -> bool {
        self.to_grid()
            .is_some_and(|grid| self.constraints.is_satisfied_by(&grid))
    }

    fn snapshot(&self) -> Grid<bool> {
        Grid::new(
            self.shape,
            self.cells.iter().map(|c| *c == Some(true)).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Enumerator;

    fn frame() -> Grid<bool> {
        Grid::from_rows(
            ["#####", "#...#", "#.#.#", "#...#", "#####"]
                .iter()
                .map(|row| row.chars().map(|c| c == '#').collect())
                .collect(),
        )
    }

    #[test]
    fn test_line_options_count() {
        // Two runs of one in five cells: C(4, 2) placements.
        assert_eq!(line_options(&[1, 1], 5).len(), 6);
        assert_eq!(line_options(&[5], 5), vec![0b11111]);
        assert_eq!(line_options(&[1, 1, 1], 5), vec![0b10101]);
    }

    #[test]
    fn test_frame_propagates_in_two_steps() {
        let fills = frame();
        let mut solver = NonogramSolver::new(&RunConstraints::from_grid(&fills));
        assert_eq!(solver.propagate(), Ok(2));
        assert_eq!(solver.to_grid(), Some(fills));
    }

    #[test]
    fn test_diagonal_needs_search() {
        // Both diagonals of a 2×2 satisfy every clue.
        let fills = Grid::from_rows(vec![vec![true, false], vec![false, true]]);
        let mut solver = NonogramSolver::new(&RunConstraints::from_grid(&fills));
        assert_eq!(solver.propagate(), Ok(1));
        assert!(!solver.is_complete());

        let found = Enumerator::uniqueness().enumerate(&mut solver);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|f| f.guesses == 1));
        assert!(found.iter().any(|f| f.solution == fills));
        assert!(solver.cells.iter().all(Option::is_none));
    }

    #[test]
    fn test_contradictory_guess_is_rejected() {
        let fills = frame();
        let mut solver = NonogramSolver::new(&RunConstraints::from_grid(&fills));
        // The top row is fully filled, so an empty corner cannot be placed.
        assert_eq!(solver.branch(0, false), None);
        assert!(solver.cells.iter().all(Option::is_none));
        assert!(solver.trail.is_empty());
    }

    #[test]
    fn test_rollback_restores_options() {
        let fills = Grid::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
            vec![true, false, true],
        ]);
        let mut solver = NonogramSolver::new(&RunConstraints::from_grid(&fills));
        let before: Vec<usize> = solver.rows.iter().map(|r| r.alive).collect();
        let mark = solver.branch(4, true).unwrap();
        solver.rollback(mark);
        let after: Vec<usize> = solver.rows.iter().map(|r| r.alive).collect();
        assert_eq!(before, after);
        assert!(solver.cells.iter().all(Option::is_none));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_search_finds_every_fill(cells in prop::collection::vec(any::<bool>(), 12)) {
            let shape = Shape::new(4, 3);
            let constraints = RunConstraints::from_grid(&Grid::new(shape, cells));
            let expected = (0u32..1 << shape.len())
                .filter(|mask| {
                    let cells = (0..shape.len()).map(|i| (mask >> i) & 1 == 1).collect();
                    let fills = Grid::new(shape, cells);
                    constraints.is_satisfied_by(&fills)
                })
                .count();

            let mut solver = NonogramSolver::new(&constraints);
            let found = match solver.propagate() {
                Ok(_) => Enumerator::unbounded().enumerate(&mut solver).len(),
                Err(_) => 0,
            };
            prop_assert_eq!(found, expected);
        }
    }
}
