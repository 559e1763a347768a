//! Nonogram generation.

use gridsmith_core::{Grid, NonogramCell, Puzzle, PuzzleKind, PuzzleSize, RunConstraints, Shape};
use gridsmith_solver::{Effort, Enumerator, NonogramSolver, difficulty};
use rand::Rng;

use crate::{GeneratorConfig, PuzzleGenerator, PuzzleRecord};

/// Generates `count` nonograms of the given size.
///
/// When the iteration cap runs out, a fixed easy puzzle is returned in place
/// of the missing one.
#[must_use]
pub fn generate(size: PuzzleSize, count: usize) -> Vec<PuzzleRecord> {
    PuzzleGenerator::new().generate(PuzzleKind::Nonogram, size, count)
}

/// Proves that `fills` is the only picture matching its run-lengths and
/// reports what the proof took.
pub(crate) fn solve_effort(fills: &Grid<bool>) -> Option<Effort> {
    let mut solver = NonogramSolver::new(&RunConstraints::from_grid(fills));
    let steps = solver.propagate().ok()?;
    if solver.is_complete() {
        debug_assert_eq!(solver.to_grid().as_ref(), Some(fills));
        return Some(Effort::Propagation { steps });
    }

    let found = Enumerator::uniqueness().enumerate(&mut solver);
    match found.as_slice() {
        [only] => {
            debug_assert_eq!(&only.solution, fills);
            Some(Effort::Backtracking {
                guesses: only.guesses,
            })
        }
        _ => None,
    }
}

/// Runs one full synthesis and uniqueness proof.
pub(crate) fn attempt<R>(size: PuzzleSize, config: &GeneratorConfig, rng: &mut R) -> Option<Puzzle>
where
    R: Rng + ?Sized,
{
    let (width, height) = PuzzleKind::Nonogram.dimensions(size);
    let p = config.fill_probability();
    let fills = Grid::from_fn(Shape::new(width, height), |_| rng.random_bool(p));

    let Some(effort) = solve_effort(&fills) else {
        log::trace!("nonogram {size}: clues admit more than one picture");
        return None;
    };
    let difficulty = difficulty::nonogram(size, effort);
    let cells = fills.map(|&filled| NonogramCell { filled });
    Some(Puzzle::nonogram(size, difficulty, cells))
}
