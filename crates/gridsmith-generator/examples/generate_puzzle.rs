//! Example demonstrating puzzle generation.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator`
//! - Generate a puzzle of any kind from a random or fixed seed
//! - Display the clues, the solution and the seed
//! - Sample many puzzles in parallel and keep the one closest to a target
//!   difficulty
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle -- nurikabe
//! ```
//!
//! Pick a size and reproduce a previous run:
//!
//! ```sh
//! cargo run --example generate_puzzle -- mosaic --size large --seed c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1 --index 3
//! ```
//!
//! Sample up to 200 puzzles and keep a hard one if any turns up:
//!
//! ```sh
//! cargo run --example generate_puzzle -- sudoku --difficulty hard --max-tries 200
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use gridsmith_core::{Difficulty, Puzzle, PuzzleKind, PuzzleSize};
use gridsmith_generator::{PuzzleGenerator, PuzzleSeed};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Mosaic,
    Nonogram,
    Nurikabe,
    Sudoku,
}

impl From<KindArg> for PuzzleKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Mosaic => Self::Mosaic,
            KindArg::Nonogram => Self::Nonogram,
            KindArg::Nurikabe => Self::Nurikabe,
            KindArg::Sudoku => Self::Sudoku,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle kind to generate.
    kind: KindArg,

    /// Grid size: small, medium or large.
    #[arg(long, value_name = "SIZE", default_value = "small")]
    size: PuzzleSize,

    /// Seed as 64 hex characters. A random seed is drawn when omitted.
    #[arg(long, value_name = "HEX")]
    seed: Option<PuzzleSeed>,

    /// Index of the puzzle within the seed's batch.
    #[arg(long, value_name = "INDEX", default_value_t = 0)]
    index: usize,

    /// Keep sampling until a puzzle of this difficulty is found.
    #[arg(long, value_name = "DIFFICULTY")]
    difficulty: Option<Difficulty>,

    /// Maximum puzzles to sample when filtering by difficulty.
    #[arg(long, value_name = "COUNT", default_value_t = 100)]
    max_tries: usize,
}

fn main() {
    let args = Args::parse();
    let kind = PuzzleKind::from(args.kind);
    let size = kind.normalize_size(args.size);
    let generator = PuzzleGenerator::new();
    let seed = args.seed.unwrap_or_else(PuzzleSeed::random);

    let Some(target) = args.difficulty else {
        print_record(&generator, kind, size, seed, args.index);
        return;
    };

    if args.max_tries == 0 {
        eprintln!("--max-tries must be at least 1.");
        process::exit(1);
    }

    let hit = (args.index..args.index + args.max_tries)
        .into_par_iter()
        .find_first(|&index| {
            generator
                .generate_one(kind, size, seed.derive(kind, size, index))
                .is_ok_and(|puzzle| puzzle.difficulty == target)
        });

    let Some(index) = hit else {
        eprintln!("No {target} {kind} in {} tries.", args.max_tries);
        process::exit(1);
    };
    print_record(&generator, kind, size, seed, index);
}

fn print_record(
    generator: &PuzzleGenerator,
    kind: PuzzleKind,
    size: PuzzleSize,
    seed: PuzzleSeed,
    index: usize,
) {
    match generator.generate_one(kind, size, seed.derive(kind, size, index)) {
        Ok(puzzle) => print_puzzle(&puzzle, seed, index),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn print_puzzle(puzzle: &Puzzle, seed: PuzzleSeed, index: usize) {
    println!("Seed:");
    println!("  {seed} (index {index})");
    println!();

    println!("Puzzle:");
    println!("  {} {} ({}×{})", puzzle.kind, puzzle.size, puzzle.width, puzzle.height);
    println!("  Difficulty: {}", puzzle.difficulty);
    println!();

    println!("Clues:");
    for line in puzzle.to_string().lines() {
        println!("  {line}");
    }
    println!();
    println!("Solution:");
    for line in format!("{puzzle:#}").lines() {
        println!("  {line}");
    }
}
