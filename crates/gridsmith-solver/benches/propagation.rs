//! Micro-benchmarks for propagation and uniqueness checks.
//!
//! Each benchmark starts from a fixed puzzle state, so results only reflect
//! solver cost.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench propagation
//! ```

use std::hint;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gridsmith_core::{Digit, Grid, RunConstraints, Shape, SudokuCell};
use gridsmith_solver::{Enumerator, NonogramSolver, NurikabeSolver, SudokuSearch};

fn nonogram_constraints() -> RunConstraints {
    // A 10×10 spiral.
    let rows = [
        "##########",
        ".........#",
        "#######..#",
        "#.....#..#",
        "#.###.#..#",
        "#.#...#..#",
        "#.#####..#",
        "#........#",
        "##########",
        "..........",
    ];
    let fills = Grid::from_rows(
        rows.iter()
            .map(|row| row.chars().map(|ch| ch == '#').collect())
            .collect(),
    );
    RunConstraints::from_grid(&fills)
}

fn nurikabe_numbers() -> Grid<Option<u8>> {
    let rows = [
        "....2.5", ".1.....", "...2...", "1......", "..2....", "2......", "..2..2.",
    ];
    Grid::from_rows(
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|ch| ch.to_digit(10).and_then(|d| u8::try_from(d).ok()))
                    .collect()
            })
            .collect(),
    )
}

fn sudoku_cells(hidden: usize) -> Grid<SudokuCell> {
    Grid::from_fn(Shape::square(9), |pos| SudokuCell {
        digit: Digit::ALL[(pos.x() + 3 * pos.y() + pos.y() / 3) % 9],
        revealed: pos.y() * 9 + pos.x() >= hidden,
    })
}

fn bench_nonogram_propagate(c: &mut Criterion) {
    let solver = NonogramSolver::new(&nonogram_constraints());
    c.bench_function("nonogram_propagate", |b| {
        b.iter_batched_ref(
            || hint::black_box(solver.clone()),
            |solver| hint::black_box(solver.propagate()),
            BatchSize::SmallInput,
        );
    });
}

fn bench_nurikabe_propagate(c: &mut Criterion) {
    let solver = NurikabeSolver::new(&nurikabe_numbers());
    c.bench_function("nurikabe_propagate", |b| {
        b.iter_batched_ref(
            || hint::black_box(solver.clone()),
            |solver| hint::black_box(solver.propagate()),
            BatchSize::SmallInput,
        );
    });
}

fn bench_sudoku_uniqueness(c: &mut Criterion) {
    for hidden in [20, 40] {
        let cells = sudoku_cells(hidden);
        c.bench_with_input(
            BenchmarkId::new("sudoku_uniqueness", format!("hidden_{hidden}")),
            &cells,
            |b, cells| {
                b.iter(|| {
                    let found = Enumerator::uniqueness().enumerate(&mut SudokuSearch::new(cells));
                    hint::black_box(found.len())
                });
            },
        );
    }
}

criterion_group!(
    benches,
    bench_nonogram_propagate,
    bench_nurikabe_propagate,
    bench_sudoku_uniqueness,
);
criterion_main!(benches);
