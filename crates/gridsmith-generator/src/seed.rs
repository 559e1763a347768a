//! Reproducible generation seeds.

use std::{fmt, str::FromStr};

use gridsmith_core::{PuzzleKind, PuzzleSize};
use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// A 256-bit seed that fully determines a generation run.
///
/// Seeds display as 64 lowercase hex characters and parse back from the same
/// form, so a printed seed can be passed back in to regenerate a puzzle.
///
/// # Examples
///
/// ```
/// use gridsmith_generator::PuzzleSeed;
///
/// let seed: PuzzleSeed = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
///     .parse()
///     .unwrap();
/// assert_eq!(seed.to_string().parse::<PuzzleSeed>(), Ok(seed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PuzzleSeed([u8; 32]);

impl PuzzleSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a seed from the thread-local random number generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives the seed of the `index`-th puzzle of a batch.
    ///
    /// Derivation hashes this seed together with the kind, the size and the
    /// index, so batch items are independent of one another and of the
    /// order they are generated in.
    #[must_use]
    pub fn derive(&self, kind: PuzzleKind, size: PuzzleSize, index: usize) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update(kind.to_string().as_bytes());
        hasher.update(b"/");
        hasher.update(size.to_string().as_bytes());
        hasher.update((index as u64).to_le_bytes());
        let mut bytes = [0; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    /// Returns a random number generator seeded with this seed.
    #[must_use]
    pub fn rng(&self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl fmt::Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`PuzzleSeed`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The string is not 64 characters long.
    #[display("seed must be 64 hex characters, got {len}")]
    InvalidLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// The string contains a non-hex character.
    #[display("invalid hex character {ch:?} in seed")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
    },
}

impl FromStr for PuzzleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 64 {
            return Err(ParseSeedError::InvalidLength { len: s.len() });
        }
        let nibble = |ch: char| {
            ch.to_digit(16)
                .and_then(|d| u8::try_from(d).ok())
                .ok_or(ParseSeedError::InvalidCharacter { ch })
        };
        let mut bytes = [0; 32];
        let mut chars = s.chars();
        for byte in &mut bytes {
            let (Some(hi), Some(lo)) = (chars.next(), chars.next()) else {
                return Err(ParseSeedError::InvalidLength { len: s.len() });
            };
            *byte = (nibble(hi)? << 4) | nibble(lo)?;
        }
        Ok(Self(bytes))
    }
}

impl From<PuzzleSeed> for String {
    fn from(seed: PuzzleSeed) -> Self {
        seed.to_string()
    }
}

impl TryFrom<String> for PuzzleSeed {
    type Error = ParseSeedError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
