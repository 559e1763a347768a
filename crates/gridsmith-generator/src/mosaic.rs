//! Mosaic generation.

use gridsmith_core::{Grid, MosaicCell, Puzzle, PuzzleKind, PuzzleSize, Shape};
use gridsmith_solver::{difficulty, mosaic};
use rand::{Rng, seq::IndexedRandom as _};

use crate::{
    GeneratorConfig, PuzzleGenerator, PuzzleRecord,
    reveal::{RevealTarget, reveal_until_unique},
};

/// Generates `count` mosaics of the given size.
///
/// Attempts that exhaust the iteration cap are reported as errors.
#[must_use]
pub fn generate(size: PuzzleSize, count: usize) -> Vec<PuzzleRecord> {
    PuzzleGenerator::new().generate(PuzzleKind::Mosaic, size, count)
}

struct MosaicClues {
    cells: Grid<MosaicCell>,
}

impl RevealTarget for MosaicClues {
    type Alternate = Grid<bool>;

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn is_revealed(&self, cell: usize) -> bool {
        self.cells[cell].revealed
    }

    fn reveal(&mut self, cell: usize) {
        self.cells[cell].revealed = true;
    }

    fn alternates(&self) -> Vec<Grid<bool>> {
        mosaic::alternates(&self.cells)
    }

    fn disagrees(&self, alternate: &Grid<bool>, cell: usize) -> bool {
        let shape = self.cells.shape();
        let count = shape.block_indices(cell).filter(|&n| alternate[n]).count();
        count != usize::from(self.cells[cell].neighborhood_fill)
    }
}

/// Reveals one random cell of every block that has no clue yet.
fn seed_blocks<R>(cells: &mut Grid<MosaicCell>, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let shape = cells.shape();
    for cell in 0..shape.len() {
        let block = shape.block_indices(cell).collect::<Vec<_>>();
        if block.iter().any(|&n| cells[n].revealed) {
            continue;
        }
        if let Some(&pick) = block.choose(rng) {
            cells[pick].revealed = true;
        }
    }
}

/// Runs one full synthesis and clue placement.
pub(crate) fn attempt<R>(size: PuzzleSize, config: &GeneratorConfig, rng: &mut R) -> Option<Puzzle>
where
    R: Rng + ?Sized,
{
    let (width, height) = PuzzleKind::Mosaic.dimensions(size);
    let shape = Shape::new(width, height);
    let p = config.fill_probability();
    let fills = Grid::from_fn(shape, |_| rng.random_bool(p));

    let mut cells = MosaicCell::grid_from_fills(&fills);
    for cell in cells.iter_mut() {
        cell.revealed = true;
    }
    if !mosaic::is_unique(&cells) {
        log::trace!("mosaic {size}: fill is ambiguous even fully revealed");
        return None;
    }

    for cell in cells.iter_mut() {
        cell.revealed = false;
    }
    seed_blocks(&mut cells, rng);
    let mut clues = MosaicClues { cells };
    if !reveal_until_unique(&mut clues, rng) {
        log::trace!("mosaic {size}: clue placement stalled");
        return None;
    }

    let cells = clues.cells;
    let revealed = cells.iter().filter(|cell| cell.revealed).count();
    let difficulty = difficulty::mosaic(revealed, cells.len());
    Some(Puzzle::mosaic(size, difficulty, cells))
}

#[cfg(test)]
mod tests {
    use gridsmith_core::Layout;
    use gridsmith_solver::{Enumerator, MosaicSearch};

    use super::*;
    use crate::PuzzleSeed;

    #[test]
    fn test_seed_blocks_covers_every_block() {
        let mut cells = MosaicCell::grid_from_fills(&Grid::filled(Shape::square(7), false));
        let mut rng = PuzzleSeed::new([3; 32]).rng();
        seed_blocks(&mut cells, &mut rng);
        let shape = cells.shape();
        for cell in 0..shape.len() {
            assert!(shape.block_indices(cell).any(|n| cells[n].revealed));
        }
    }

    #[test]
    fn test_attempt_yields_unique_puzzle() {
        let config = GeneratorConfig::default();
        let mut rng = PuzzleSeed::new([11; 32]).rng();
        let puzzle = (0..config.mosaic_attempts)
            .find_map(|_| attempt(PuzzleSize::Small, &config, &mut rng))
            .expect("a small mosaic within the attempt cap");
        assert_eq!((puzzle.width, puzzle.height), (5, 5));
        let Layout::Mosaic(cells) = &puzzle.layout else {
            panic!("expected a mosaic layout");
        };
        let found = Enumerator::unbounded().enumerate(&mut MosaicSearch::new(cells));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].solution, cells.map(|cell| cell.filled));
        assert_eq!(
            puzzle.difficulty,
            difficulty::mosaic(puzzle.revealed_count(), 25)
        );
    }
}
