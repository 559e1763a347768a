//! Nurikabe regional deduction and search space.
//!
//! The solver tracks which cells are river, which are island, and which
//! numbered island every island cell has been attributed to. Propagation
//! repeats a round of deduction passes until a whole round changes nothing.
//! Each pass only makes deductions that hold in every valid completion, and a
//! state that cannot lead to a valid layout is reported as a
//! [`Contradiction`].

use gridsmith_core::{Grid, NurikabeCell, Shape, region};

use crate::{Contradiction, SearchSpace};

/// The assignment state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    /// Not decided yet.
    Unknown,
    /// Part of some island.
    Island,
    /// Part of the river.
    River,
}

#[derive(Debug, Clone, Copy)]
struct Island {
    capacity: usize,
    size: usize,
}

impl Island {
    fn is_complete(self) -> bool {
        self.size >= self.capacity
    }
}

#[derive(Debug, Clone, Copy)]
enum Change {
    Fill(usize),
    Join(usize),
}

/// Propagating solver and search space for a nurikabe.
///
/// # Examples
///
/// ```
/// use gridsmith_core::Grid;
/// use gridsmith_solver::NurikabeSolver;
///
/// // A single 1 in the middle of a 3×3 grid forces the whole ring to river.
/// let mut numbers = Grid::filled(gridsmith_core::Shape::square(3), None);
/// numbers[4] = Some(1);
/// let mut solver = NurikabeSolver::new(&numbers);
/// solver.propagate()?;
/// let river = solver.to_grid().unwrap();
/// assert_eq!(river.iter().filter(|&&r| r).count(), 8);
/// # Ok::<(), gridsmith_solver::Contradiction>(())
/// ```
#[derive(Debug, Clone)]
pub struct NurikabeSolver {
    shape: Shape,
    numbers: Grid<Option<u8>>,
    fill: Vec<Fill>,
    owner: Vec<Option<usize>>,
    islands: Vec<Island>,
    river_capacity: usize,
    river_count: usize,
    trail: Vec<Change>,
}

impl NurikabeSolver {
    /// Creates a solver whose only known cells are the numbered ones.
    #[must_use]
    pub fn new(numbers: &Grid<Option<u8>>) -> Self {
        let shape = numbers.shape();
        let mut fill = vec![Fill::Unknown; shape.len()];
        let mut owner = vec![None; shape.len()];
        let mut islands = vec![];
        for (i, number) in numbers.iter().enumerate() {
            if let Some(number) = *number {
                fill[i] = Fill::Island;
                owner[i] = Some(islands.len());
                islands.push(Island {
                    capacity: usize::from(number),
                    size: 1,
                });
            }
        }
        let island_cells: usize = islands.iter().map(|island| island.capacity).sum();
        Self {
            shape,
            numbers: numbers.clone(),
            fill,
            owner,
            islands,
            river_capacity: shape.len().saturating_sub(island_cells),
            river_count: 0,
            trail: vec![],
        }
    }

    /// Creates a solver from the numbers of a puzzle layout.
    #[must_use]
    pub fn from_cells(cells: &Grid<NurikabeCell>) -> Self {
        Self::new(&cells.map(|cell| cell.number))
    }

    /// Returns the state of `cell`.
    #[must_use]
    pub fn fill(&self, cell: usize) -> Fill {
        self.fill[cell]
    }

    /// Returns `true` once every cell is decided.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.fill.contains(&Fill::Unknown)
    }

    /// Returns the river mask, or `None` while a cell is undecided.
    #[must_use]
    pub fn to_grid(&self) -> Option<Grid<bool>> {
        let river = self
            .fill
            .iter()
            .map(|fill| match fill {
                Fill::Unknown => None,
                Fill::Island => Some(false),
                Fill::River => Some(true),
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Grid::new(self.shape, river))
    }

    fn set_river(&mut self, cell: usize) -> Result<bool, Contradiction> {
        match self.fill[cell] {
            Fill::Unknown => {
                self.fill[cell] = Fill::River;
                self.river_count += 1;
                self.trail.push(Change::Fill(cell));
                Ok(true)
            }
            Fill::River => Ok(false),
            Fill::Island => Err(Contradiction),
        }
    }

    fn set_island(&mut self, cell: usize, id: Option<usize>) -> Result<bool, Contradiction> {
        let mut changed = false;
        match self.fill[cell] {
            Fill::Unknown => {
                self.fill[cell] = Fill::Island;
                self.trail.push(Change::Fill(cell));
                changed = true;
            }
            Fill::Island => {}
            Fill::River => return Err(Contradiction),
        }
        match (id, self.owner[cell]) {
            (Some(id), None) => {
                self.join(cell, id);
                Ok(true)
            }
            (Some(id), Some(owner)) if id != owner => Err(Contradiction),
            _ => Ok(changed),
        }
    }

    fn join(&mut self, cell: usize, id: usize) {
        self.owner[cell] = Some(id);
        self.islands[id].size += 1;
        self.trail.push(Change::Join(cell));
    }

    fn is_unattributed(&self, cell: usize) -> bool {
        self.fill[cell] == Fill::Island && self.owner[cell].is_none()
    }

    fn members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![vec![]; self.islands.len()];
        for (cell, owner) in self.owner.iter().enumerate() {
            if let Some(id) = *owner {
                members[id].push(cell);
            }
        }
        members
    }

    fn neighbor_owners(&self, cell: usize) -> Vec<usize> {
        let mut owners = self
            .shape
            .adjacent_indices(cell)
            .filter_map(|n| self.owner[n])
            .collect::<Vec<_>>();
        owners.sort_unstable();
        owners.dedup();
        owners
    }

    fn border(&self, cells: &[usize], include: impl Fn(usize) -> bool) -> Vec<usize> {
        let mut border = cells
            .iter()
            .flat_map(|&cell| self.shape.adjacent_indices(cell))
            .filter(|&n| include(n))
            .collect::<Vec<_>>();
        border.sort_unstable();
        border.dedup();
        border
    }

    fn check(&self) -> Result<(), Contradiction> {
        if self.river_count > self.river_capacity {
            return Err(Contradiction);
        }
        if self.islands.iter().any(|island| island.size > island.capacity) {
            return Err(Contradiction);
        }
        for cell in 0..self.shape.len() {
            let Some(id) = self.owner[cell] else {
                continue;
            };
            if self.neighbor_owners(cell).iter().any(|&other| other != id) {
                return Err(Contradiction);
            }
        }
        if self
            .shape
            .squares()
            .any(|square| square.iter().all(|&i| self.fill[i] == Fill::River))
        {
            return Err(Contradiction);
        }
        for (id, cells) in self.members().iter().enumerate() {
            if self.islands[id].is_complete() {
                continue;
            }
            let room = self.border(cells, |n| {
                self.fill[n] == Fill::Unknown || self.is_unattributed(n)
            });
            if room.is_empty() {
                return Err(Contradiction);
            }
        }
        Ok(())
    }

    /// Unattributed island cells join the island they touch, until no more
    /// cells join.
    fn chain_islands(&mut self) -> Result<bool, Contradiction> {
        let mut progress = false;
        loop {
            let mut joined = false;
            for cell in 0..self.shape.len() {
                if !self.is_unattributed(cell) {
                    continue;
                }
                match self.neighbor_owners(cell).as_slice() {
                    [] => {}
                    [id] => {
                        self.join(cell, *id);
                        joined = true;
                    }
                    _ => return Err(Contradiction),
                }
            }
            if !joined {
                return Ok(progress);
            }
            progress = true;
        }
    }

    /// Complete islands are walled in by river.
    fn seal_complete_islands(&mut self) -> Result<bool, Contradiction> {
        let mut progress = false;
        for (id, cells) in self.members().into_iter().enumerate() {
            if !self.islands[id].is_complete() {
                continue;
            }
            for cell in self.border(&cells, |n| self.fill[n] == Fill::Unknown) {
                progress |= self.set_river(cell)?;
            }
        }
        Ok(progress)
    }

    /// A cell touching two islands would merge them.
    fn separate_islands(&mut self) -> Result<bool, Contradiction> {
        let mut progress = false;
        for cell in 0..self.shape.len() {
            if self.fill[cell] == Fill::Unknown && self.neighbor_owners(cell).len() > 1 {
                progress |= self.set_river(cell)?;
            }
        }
        Ok(progress)
    }

    /// An incomplete island with a single way out grows through it.
    fn expand_single_exits(&mut self) -> Result<bool, Contradiction> {
        let mut progress = false;
        for id in 0..self.islands.len() {
            if self.islands[id].is_complete() {
                continue;
            }
            let cells = self
                .owner
                .iter()
                .enumerate()
                .filter_map(|(cell, owner)| (*owner == Some(id)).then_some(cell))
                .collect::<Vec<_>>();
            let exits = self.border(&cells, |n| {
                self.fill[n] == Fill::Unknown || self.is_unattributed(n)
            });
            if let [exit] = exits[..] {
                progress |= self.set_island(exit, Some(id))?;
            }
        }
        Ok(progress)
    }

    /// A cell surrounded by river cannot be an unnumbered island.
    fn fill_enclosed(&mut self) -> Result<bool, Contradiction> {
        let mut progress = false;
        for cell in 0..self.shape.len() {
            if self.fill[cell] == Fill::Unknown
                && self
                    .shape
                    .adjacent_indices(cell)
                    .all(|n| self.fill[n] == Fill::River)
            {
                progress |= self.set_river(cell)?;
            }
        }
        Ok(progress)
    }

    /// While the river is short, a river piece with one way out extends
    /// through it. At most one cell is forced per call.
    fn extend_river(&mut self) -> Result<bool, Contradiction> {
        if self.river_count >= self.river_capacity {
            return Ok(false);
        }
        let pieces = region::components(self.shape, |i| self.fill[i] == Fill::River);
        for piece in pieces {
            match self.border(&piece, |n| self.fill[n] == Fill::Unknown)[..] {
                [] => return Err(Contradiction),
                [escape] => return self.set_river(escape),
                _ => {}
            }
        }
        Ok(false)
    }

    /// Three river cells of a 2×2 square force the fourth to island.
    fn avoid_pools(&mut self) -> Result<bool, Contradiction> {
        let mut progress = false;
        let squares = self.shape.squares().collect::<Vec<_>>();
        for square in squares {
            let river = square
                .iter()
                .filter(|&&i| self.fill[i] == Fill::River)
                .count();
            if river == 4 {
                return Err(Contradiction);
            }
            if river == 3 {
                if let Some(&open) = square.iter().find(|&&i| self.fill[i] == Fill::Unknown) {
                    progress |= self.set_island(open, None)?;
                }
            }
        }
        Ok(progress)
    }

    /// Cells no incomplete island can reach with its missing members are
    /// river.
    fn drain_unreachable(&mut self) -> Result<bool, Contradiction> {
        let mut reached = vec![false; self.shape.len()];
        for (id, cells) in self.members().into_iter().enumerate() {
            let island = self.islands[id];
            if island.is_complete() {
                continue;
            }
            let mut seen = vec![false; self.shape.len()];
            for &cell in &cells {
                seen[cell] = true;
            }
            let mut frontier = cells;
            for _ in 0..island.capacity.saturating_sub(island.size) {
                let mut next = vec![];
                for &cell in &frontier {
                    for n in self.shape.adjacent_indices(cell) {
                        if !seen[n] && (self.fill[n] == Fill::Unknown || self.is_unattributed(n)) {
                            seen[n] = true;
                            reached[n] = true;
                            next.push(n);
                        }
                    }
                }
                frontier = next;
            }
        }
        let mut progress = false;
        for cell in 0..self.shape.len() {
            if reached[cell] {
                continue;
            }
            if self.fill[cell] == Fill::Unknown {
                progress |= self.set_river(cell)?;
            } else if self.is_unattributed(cell) {
                return Err(Contradiction);
            }
        }
        Ok(progress)
    }

    /// Runs the deduction passes until a full round makes no progress.
    ///
    /// Returns the number of rounds taken.
    ///
    /// # Errors
    ///
    /// Returns [`Contradiction`] if the current state cannot be completed
    /// into a valid layout. Changes made before the contradiction stay on the
    /// trail.
    pub fn propagate(&mut self) -> Result<usize, Contradiction> {
        let mut rounds = 0;
        loop {
            self.check()?;
            rounds += 1;
            let mut progress = self.chain_islands()?;
            progress |= self.seal_complete_islands()?;
            progress |= self.separate_islands()?;
            progress |= self.expand_single_exits()?;
            progress |= self.fill_enclosed()?;
            progress |= self.extend_river()?;
            progress |= self.avoid_pools()?;
            progress |= self.drain_unreachable()?;
            if !progress {
                break;
            }
        }
        log::trace!("nurikabe propagation settled after {rounds} rounds");
        Ok(rounds)
    }
}

impl SearchSpace for NurikabeSolver {
    type Value = bool;
    type Mark = usize;
    type Solution = Grid<bool>;

    const VALUES: &'static [bool] = &[true, false];

    fn next_open(&self) -> Option<usize> {
        self.fill.iter().position(|&fill| fill == Fill::Unknown)
    }

    fn branch(&mut self, cell: usize, river: bool) -> Option<usize> {
        let mark = self.trail.len();
        let applied = if river {
            self.set_river(cell)
        } else {
            self.set_island(cell, None)
        };
        if applied.is_err() || self.propagate().is_err() {
            self.rollback(mark);
            return None;
        }
        Some(mark)
    }

    fn rollback(&mut self, mark: usize) {
        while self.trail.len() > mark {
            match self.trail.pop() {
                Some(Change::Fill(cell)) => {
                    if self.fill[cell] == Fill::River {
                        self.river_count -= 1;
                    }
                    self.fill[cell] = Fill::Unknown;
                }
                Some(Change::Join(cell)) => {
                    if let Some(id) = self.owner[cell].take() {
                        self.islands[id].size -= 1;
                    }
                }
                None => break,
            }
        }
    }

    fn is_solution(&self) -> bool {
        self.to_grid()
            .is_some_and(|river| is_valid_layout(&river, &self.numbers))
    }

    fn snapshot(&self) -> Grid<bool> {
        Grid::new(
            self.shape,
            self.fill.iter().map(|&fill| fill == Fill::River).collect(),
        )
    }
}

/// Checks a complete river mask against the island numbers.
///
/// The layout is valid when the river is connected, no 2×2 square is all
/// river, and every island holds exactly one number equal to its size.
#[must_use]
pub fn is_valid_layout(river: &Grid<bool>, numbers: &Grid<Option<u8>>) -> bool {
    let shape = river.shape();
    if shape != numbers.shape() {
        return false;
    }
    if river.iter().any(|&is_river| is_river) && !region::is_connected(shape, |i| river[i]) {
        return false;
    }
    if shape
        .squares()
        .any(|square| square.iter().all(|&i| river[i]))
    {
        return false;
    }
    if numbers
        .iter()
        .zip(river)
        .any(|(number, &is_river)| number.is_some() && is_river)
    {
        return false;
    }
    region::components(shape, |i| !river[i])
        .iter()
        .all(|island| {
            let mut labels = island.iter().filter_map(|&i| numbers[i]);
            matches!(
                (labels.next(), labels.next()),
                (Some(label), None) if usize::from(label) == island.len()
            )
        })
}

/// Checks the river and numbers of a nurikabe layout.
#[must_use]
pub fn is_valid_cells(cells: &Grid<NurikabeCell>) -> bool {
    is_valid_layout(&cells.map(|cell| cell.river), &cells.map(|cell| cell.number))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Enumerator;

    fn numbers(width: usize, height: usize, clues: &[(usize, u8)]) -> Grid<Option<u8>> {
        let mut grid = Grid::filled(Shape::new(width, height), None);
        for &(cell, number) in clues {
            grid[cell] = Some(number);
        }
        grid
    }

    fn parse(rows: &[&str]) -> Grid<Option<u8>> {
        Grid::from_rows(
            rows.iter()
                .map(|row| {
                    row.chars()
                        .map(|c| c.to_digit(10).and_then(|d| u8::try_from(d).ok()))
                        .collect()
                })
                .collect(),
        )
    }

    /// Counts valid layouts by trying every river mask.
    fn count_by_brute_force(numbers: &Grid<Option<u8>>) -> usize {
        let shape = numbers.shape();
        (0u32..1 << shape.len())
            .filter(|mask| {
                let cells = (0..shape.len()).map(|i| (mask >> i) & 1 == 1).collect();
                let river = Grid::new(shape, cells);
                is_valid_layout(&river, numbers)
            })
            .count()
    }

    fn count_by_search(numbers: &Grid<Option<u8>>) -> usize {
        let mut solver = NurikabeSolver::new(numbers);
        if solver.propagate().is_err() {
            return 0;
        }
        Enumerator::unbounded().enumerate(&mut solver).len()
    }

    #[test]
    fn test_single_island_corner() {
        let mut solver = NurikabeSolver::new(&numbers(2, 2, &[(0, 1)]));
        assert!(solver.propagate().is_ok());
        assert!(solver.is_complete());
        assert_eq!(
            solver.to_grid().unwrap().into_vec(),
            vec![false, true, true, true]
        );
        assert!(solver.is_solution());
    }

    #[test]
    fn test_two_completions_need_a_guess() {
        // .2.
        // ...
        let mut solver = NurikabeSolver::new(&numbers(3, 2, &[(1, 2)]));
        solver.propagate().unwrap();
        assert!(!solver.is_complete());
        assert_eq!(solver.fill(3), Fill::River);
        assert_eq!(solver.fill(5), Fill::River);

        let found = Enumerator::unbounded().enumerate(&mut solver);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|f| f.guesses == 1));
        let clues = numbers(3, 2, &[(1, 2)]);
        assert!(found.iter().all(|f| is_valid_layout(&f.solution, &clues)));
        assert_eq!(solver.next_open(), Some(0));
    }

    #[test]
    fn test_contradiction_rolls_back() {
        // Making a neighbor of a complete 1 into island overfills it.
        let mut solver = NurikabeSolver::new(&numbers(2, 2, &[(0, 1)]));
        let trail = solver.trail.len();
        assert_eq!(solver.branch(1, false), None);
        assert_eq!(solver.trail.len(), trail);
        assert_eq!(solver.fill(1), Fill::Unknown);
        assert_eq!(solver.river_count, 0);
    }

    #[test]
    fn test_layout_validation() {
        let clues = numbers(3, 3, &[(4, 1)]);
        let ring = Grid::from_fn(Shape::square(3), |pos| pos.x() != 1 || pos.y() != 1);
        assert!(is_valid_layout(&ring, &clues));

        // Pool in the top-left square.
        let clues = numbers(3, 3, &[(8, 1)]);
        let pool = Grid::from_fn(Shape::square(3), |pos| pos.x() != 2 || pos.y() != 2);
        assert!(!is_valid_layout(&pool, &clues));

        // Island larger than its number.
        let clues = numbers(3, 2, &[(1, 1)]);
        let wide = Grid::from_rows(vec![vec![false, false, true], vec![true, true, true]]);
        assert!(!is_valid_layout(&wide, &clues));

        // Split river.
        let clues = numbers(3, 1, &[(1, 1)]);
        let split = Grid::from_rows(vec![vec![true, false, true]]);
        assert!(!is_valid_layout(&split, &clues));

        // No river at all.
        let clues = numbers(2, 1, &[(0, 2)]);
        let land = Grid::from_rows(vec![vec![false, false]]);
        assert!(is_valid_layout(&land, &clues));
    }

    #[test]
    fn test_island_completed_by_chain_is_not_expanded() {
        let clues = parse(&["3...", "....", "....", "...4"]);
        assert_eq!(count_by_brute_force(&clues), 4);
        assert_eq!(count_by_search(&clues), 4);

        let clues = parse(&["....", "....", "...4"]);
        assert_eq!(count_by_brute_force(&clues), 2);
        assert_eq!(count_by_search(&clues), 2);
    }

    #[test]
    fn test_single_exit_may_be_an_island_cell() {
        // 2.
        // ..
        // With the corner's right neighbor river and the cell below it an
        // unattributed island cell, the island must take that cell.
        let mut solver = NurikabeSolver::new(&parse(&["2.", ".."]));
        solver.set_river(1).unwrap();
        solver.set_island(2, None).unwrap();
        assert_eq!(solver.expand_single_exits(), Ok(true));
        assert_eq!(solver.owner[2], Some(0));
        assert_eq!(solver.fill(3), Fill::Unknown);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_search_finds_every_layout(
            clues in prop::collection::vec(prop::option::weighted(0.25, 1u8..=5), 12)
        ) {
            let numbers = Grid::new(Shape::new(4, 3), clues);
            prop_assert_eq!(count_by_search(&numbers), count_by_brute_force(&numbers));
        }
    }
}
