//! Command-line puzzle generator.
//!
//! Prints a batch of puzzles as a JSON array. Log output is controlled with
//! `RUST_LOG`.
//!
//! ```sh
//! gridsmith nurikabe --size medium --count 3 --pretty
//! ```

use std::{
    io::{self, Write as _},
    process::ExitCode,
};

use clap::Parser;
use gridsmith_app::{Worker, generate_batch};
use gridsmith_core::{Puzzle, PuzzleKind, PuzzleSize};
use gridsmith_generator::{PuzzleGenerator, PuzzleSeed};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle kind: mosaic, nonogram, nurikabe or sudoku.
    kind: PuzzleKind,

    /// Grid size: small, medium or large. Ignored for sudoku.
    #[arg(long, value_name = "SIZE", default_value = "small")]
    size: PuzzleSize,

    /// Number of puzzles to generate.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    count: usize,

    /// Seed as 64 hex characters. A random seed is drawn when omitted.
    #[arg(long, value_name = "HEX")]
    seed: Option<PuzzleSeed>,

    /// Generate on the rayon thread pool instead of the worker thread.
    #[arg(long)]
    parallel: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    {
        better_panic::install();
        env_logger::init();
    }

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(PuzzleSeed::random);
    log::info!(
        "generating {} {} puzzle(s) of size {} with seed {seed}",
        args.count,
        args.kind,
        args.size
    );

    let batch = if args.parallel {
        generate_batch(
            &PuzzleGenerator::new(),
            args.kind,
            args.size,
            args.count,
            seed,
            true,
        )
    } else {
        match Worker::default().generate(args.kind, args.size, args.count, Some(seed)) {
            Ok(batch) => batch,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        }
    };

    let mut puzzles = Vec::<Puzzle>::with_capacity(batch.len());
    let mut failed = 0;
    for record in batch {
        match record {
            Ok(puzzle) => puzzles.push(puzzle),
            Err(err) => {
                log::error!("{err}");
                failed += 1;
            }
        }
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&puzzles)
    } else {
        serde_json::to_string(&puzzles)
    };
    let json = match json {
        Ok(json) => json,
        Err(err) => {
            log::error!("failed to serialize puzzles: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = writeln!(io::stdout().lock(), "{json}") {
        log::error!("failed to write output: {err}");
        return ExitCode::FAILURE;
    }

    log::info!("{} puzzle(s) written, {failed} failed", puzzles.len());
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
