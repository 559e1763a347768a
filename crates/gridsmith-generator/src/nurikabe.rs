//! Nurikabe generation.
//!
//! A river is grown cell by cell from a random seed, never closing a 2×2
//! pool, with a crowding test that favours thin, winding shapes. Whatever the
//! river leaves behind becomes the islands, each labelled with its size on
//! one random member. Layouts whose islands are too uniform or too lopsided
//! are redrawn before any solving happens.

use gridsmith_core::{Grid, NurikabeCell, Puzzle, PuzzleKind, PuzzleSize, Shape, region};
use gridsmith_solver::{Effort, Enumerator, NurikabeSolver, difficulty};
use rand::{
    Rng,
    seq::{IndexedRandom as _, SliceRandom as _},
};

use crate::{GeneratorConfig, PuzzleGenerator, PuzzleRecord};

/// Generates `count` nurikabes of the given size.
///
/// When the iteration cap runs out, a fixed medium puzzle is returned in
/// place of the missing one.
#[must_use]
pub fn generate(size: PuzzleSize, count: usize) -> Vec<PuzzleRecord> {
    PuzzleGenerator::new().generate(PuzzleKind::Nurikabe, size, count)
}

/// Returns `true` if making `cell` river would complete an all-river 2×2
/// square.
fn closes_pool(shape: Shape, river: &[bool], cell: usize) -> bool {
    shape.squares().any(|square| {
        square.contains(&cell) && square.iter().all(|&i| i == cell || river[i])
    })
}

/// Decides whether the river may grow into `cell`.
///
/// The window spans two cells up and left and one cell down and right. River
/// cells in the 3×3 block around `cell` count double, so the more crowded
/// the window, the less likely the river is to grow there.
fn accepts_growth<R>(shape: Shape, river: &[bool], cell: usize, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    let pos = shape.position_of(cell);
    let mut score = 0;
    let mut weight = 0;
    for y in pos.y().saturating_sub(2)..(pos.y() + 2).min(shape.height()) {
        for x in pos.x().saturating_sub(2)..(pos.x() + 2).min(shape.width()) {
            let near = x + 1 >= pos.x() && y + 1 >= pos.y();
            let w = if near { 2 } else { 1 };
            weight += w;
            if river[y * shape.width() + x] {
                score += w;
            }
        }
    }
    rng.random_range(0..weight) >= score
}

/// Lays out a random river and labels the islands it leaves.
pub(crate) fn synthesize<R>(shape: Shape, growth_rounds: usize, rng: &mut R) -> Grid<NurikabeCell>
where
    R: Rng + ?Sized,
{
    let n = shape.len();
    let slack = rng.random_range(0..n.div_ceil(4).max(1));
    let target = n.saturating_sub(slack + n / 3);

    let mut river = vec![false; n];
    let start = rng.random_range(0..n);
    river[start] = true;
    let mut members = vec![start];

    for _ in 0..growth_rounds {
        if members.len() >= target {
            break;
        }
        let Some(&from) = members.choose(rng) else {
            break;
        };
        let mut neighbors = shape.adjacent_indices(from).collect::<Vec<_>>();
        neighbors.shuffle(rng);
        for next in neighbors {
            if river[next] || closes_pool(shape, &river, next) {
                continue;
            }
            if accepts_growth(shape, &river, next, rng) {
                river[next] = true;
                members.push(next);
                break;
            }
        }
    }

    let mut cells = Grid::new(
        shape,
        river
            .iter()
            .map(|&is_river| NurikabeCell {
                river: is_river,
                number: None,
            })
            .collect(),
    );
    for island in region::components(shape, |i| !river[i]) {
        if let Some(&label) = island.choose(rng) {
            cells[label].number = Some(u8::try_from(island.len()).unwrap_or(u8::MAX));
        }
    }
    cells
}

/// Returns `true` if the island sizes make for a dull puzzle.
///
/// A layout is dull when it has no island, when the mean island size is below
/// 1.6 or at least 2.8, when the variance is 6 or more, when an island has 8
/// or more cells, or when 65% or more of the islands are single cells.
pub(crate) fn is_boring(sizes: &[usize]) -> bool {
    let k = sizes.len();
    if k == 0 {
        return true;
    }
    let mass: usize = sizes.iter().sum();
    // mean = mass / k
    if 5 * mass < 8 * k || 5 * mass >= 14 * k {
        return true;
    }
    // variance = sum((k * len - mass)^2) / k^3
    let spread: usize = sizes.iter().map(|&len| (k * len).abs_diff(mass).pow(2)).sum();
    if spread >= 6 * k.pow(3) {
        return true;
    }
    if sizes.iter().any(|&len| len >= 8) {
        return true;
    }
    let ones = sizes.iter().filter(|&&len| len == 1).count();
    20 * ones >= 13 * k
}

fn island_sizes(cells: &Grid<NurikabeCell>) -> Vec<usize> {
    cells.iter().filter_map(|cell| cell.number).map(usize::from).collect()
}

/// Proves that the numbers of `cells` admit only its river and reports what
/// the proof took.
pub(crate) fn solve_effort(cells: &Grid<NurikabeCell>) -> Option<Effort> {
    let truth = cells.map(|cell| cell.river);
    let mut solver = NurikabeSolver::from_cells(cells);
    let rounds = solver.propagate().ok()?;
    if solver.is_complete() {
        if solver.to_grid().as_ref() != Some(&truth) {
            return None;
        }
        return Some(Effort::Propagation { steps: rounds });
    }

    let found = Enumerator::uniqueness().enumerate(&mut solver);
    match found.as_slice() {
        [only] if only.solution == truth => Some(Effort::Backtracking {
            guesses: only.guesses,
        }),
        _ => None,
    }
}

/// Runs one full synthesis and uniqueness proof.
pub(crate) fn attempt<R>(size: PuzzleSize, config: &GeneratorConfig, rng: &mut R) -> Option<Puzzle>
where
    R: Rng + ?Sized,
{
    let (width, height) = PuzzleKind::Nurikabe.dimensions(size);
    let shape = Shape::new(width, height);
    let Some(cells) = (0..config.nurikabe_synthesis_retries)
        .map(|_| synthesize(shape, config.nurikabe_growth_rounds, rng))
        .find(|cells| !is_boring(&island_sizes(cells)))
    else {
        log::trace!("nurikabe {size}: every layout was boring");
        return None;
    };
    debug_assert!(gridsmith_solver::nurikabe::is_valid_cells(&cells));

    let Some(effort) = solve_effort(&cells) else {
        log::trace!("nurikabe {size}: numbers admit more than one river");
        return None;
    };
    let difficulty = difficulty::nurikabe(size, effort);
    Some(Puzzle::nurikabe(size, difficulty, cells))
}
