//! Generator tuning knobs.

use gridsmith_core::PuzzleKind;
use serde::{Deserialize, Serialize};

/// Tuning parameters shared by all puzzle generators.
///
/// [`Default`] gives the values the generators were calibrated with.
///
/// # Examples
///
/// ```
/// use gridsmith_core::PuzzleKind;
/// use gridsmith_generator::GeneratorConfig;
///
/// let config = GeneratorConfig {
///     sudoku_attempts: 10,
///     ..GeneratorConfig::default()
/// };
/// assert_eq!(config.attempts(PuzzleKind::Sudoku), 10);
/// assert_eq!(config.attempts(PuzzleKind::Nonogram), 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Full mosaic syntheses tried per puzzle.
    pub mosaic_attempts: usize,
    /// Full nonogram syntheses tried per puzzle.
    pub nonogram_attempts: usize,
    /// Full nurikabe syntheses tried per puzzle.
    pub nurikabe_attempts: usize,
    /// Full sudoku syntheses tried per puzzle.
    pub sudoku_attempts: usize,
    /// Probability that a mosaic or nonogram cell is filled.
    pub fill_probability: f64,
    /// Sudoku cells revealed before the first uniqueness check.
    pub sudoku_seed_clues: usize,
    /// Growth rounds spent laying out a nurikabe river.
    pub nurikabe_growth_rounds: usize,
    /// Nurikabe layouts drawn per attempt while looking for one that is not
    /// boring.
    pub nurikabe_synthesis_retries: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mosaic_attempts: 100,
            nonogram_attempts: 2000,
            nurikabe_attempts: 1000,
            sudoku_attempts: 100,
            fill_probability: 0.5,
            sudoku_seed_clues: 15,
            nurikabe_growth_rounds: 2000,
            nurikabe_synthesis_retries: 1000,
        }
    }
}

impl GeneratorConfig {
    /// Returns the number of full syntheses tried per puzzle of `kind`.
    #[must_use]
    pub fn attempts(&self, kind: PuzzleKind) -> usize {
        match kind {
            PuzzleKind::Mosaic => self.mosaic_attempts,
            PuzzleKind::Nonogram => self.nonogram_attempts,
            PuzzleKind::Nurikabe => self.nurikabe_attempts,
            PuzzleKind::Sudoku => self.sudoku_attempts,
        }
    }

    pub(crate) fn fill_probability(&self) -> f64 {
        self.fill_probability.clamp(0.0, 1.0)
    }
}
