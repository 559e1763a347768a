//! Puzzle kinds, size categories and difficulty categories.
//!
//! All three enums render as lowercase words (`"mosaic"`, `"small"`,
//! `"hard"`) and parse back from the same words, case-insensitively.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four puzzle families the generators know about.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleKind {
    /// Area-count puzzle: each clue counts the filled cells of its 3×3 block.
    #[display("mosaic")]
    Mosaic,
    /// Run-length puzzle: rows and columns list their filled runs.
    #[display("nonogram")]
    Nonogram,
    /// Region puzzle: numbered islands in one connected river.
    #[display("nurikabe")]
    Nurikabe,
    /// Digit-placement puzzle on a 9×9 grid.
    #[display("sudoku")]
    Sudoku,
}

impl PuzzleKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 4] = [Self::Mosaic, Self::Nonogram, Self::Nurikabe, Self::Sudoku];

    /// Returns the grid `(width, height)` for puzzles of this kind and size.
    ///
    /// Sudoku is always 9×9. [`PuzzleSize::Standard`] maps to the small
    /// dimension for the other kinds.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridsmith_core::{PuzzleKind, PuzzleSize};
    ///
    /// assert_eq!(PuzzleKind::Mosaic.dimensions(PuzzleSize::Large), (9, 9));
    /// assert_eq!(PuzzleKind::Nonogram.dimensions(PuzzleSize::Medium), (10, 10));
    /// assert_eq!(PuzzleKind::Sudoku.dimensions(PuzzleSize::Small), (9, 9));
    /// ```
    #[must_use]
    pub const fn dimensions(self, size: PuzzleSize) -> (usize, usize) {
        let side = match (self, size) {
            (Self::Sudoku, _) => 9,
            (Self::Mosaic | Self::Nurikabe, PuzzleSize::Small | PuzzleSize::Standard) => 5,
            (Self::Mosaic | Self::Nurikabe, PuzzleSize::Medium) => 7,
            (Self::Mosaic | Self::Nurikabe, PuzzleSize::Large) => 9,
            (Self::Nonogram, PuzzleSize::Small | PuzzleSize::Standard) => 5,
            (Self::Nonogram, PuzzleSize::Medium) => 10,
            (Self::Nonogram, PuzzleSize::Large) => 15,
        };
        (side, side)
    }

    /// Returns the size category recorded for a request of `size`.
    ///
    /// Sudoku ignores the requested size and is always recorded as
    /// [`PuzzleSize::Standard`]; every other kind keeps the request.
    #[must_use]
    pub const fn normalize_size(self, size: PuzzleSize) -> PuzzleSize {
        match self {
            Self::Sudoku => PuzzleSize::Standard,
            Self::Mosaic | Self::Nonogram | Self::Nurikabe => size,
        }
    }
}

/// Error returned when parsing an unknown [`PuzzleKind`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown puzzle kind `{input}` (expected mosaic, nonogram, nurikabe or sudoku)")]
pub struct ParseKindError {
    input: String,
}

impl FromStr for PuzzleKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseKindError {
                input: s.to_owned(),
            })
    }
}

/// Size category of a puzzle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleSize {
    /// The smallest grid of a kind.
    #[display("small")]
    Small,
    /// The intermediate grid of a kind.
    #[display("medium")]
    Medium,
    /// The largest grid of a kind.
    #[display("large")]
    Large,
    /// The only size sudoku comes in.
    #[display("standard")]
    Standard,
}

impl PuzzleSize {
    /// All sizes, in declaration order.
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::Standard];
}

/// Error returned when parsing an unknown [`PuzzleSize`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown puzzle size `{input}` (expected small, medium, large or standard)")]
pub struct ParseSizeError {
    input: String,
}

impl FromStr for PuzzleSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSizeError {
                input: s.to_owned(),
            })
    }
}

/// Difficulty category of a finished puzzle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy.
    #[display("easy")]
    Easy,
    /// Medium.
    #[display("medium")]
    Medium,
    /// Hard.
    #[display("hard")]
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];
}

/// Error returned when parsing an unknown [`Difficulty`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty `{input}` (expected easy, medium or hard)")]
pub struct ParseDifficultyError {
    input: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDifficultyError {
                input: s.to_owned(),
            })
    }
}
