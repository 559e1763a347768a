//! A set of sudoku digits, optimized for row/column/box bookkeeping.
//!
//! # Examples
//!
//! ```
//! use gridsmith_core::{Digit, DigitSet};
//!
//! let mut used = DigitSet::EMPTY;
//! used.insert(Digit::D1);
//! used.insert(Digit::D5);
//!
//! assert_eq!(used.len(), 2);
//! assert!(used.contains(Digit::D5));
//! assert!(!used.contains(Digit::D9));
//! ```

use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

use crate::Digit;

/// A set of digits 1-9, represented as a bitset.
///
/// The implementation uses a 16-bit integer where bits 0-8 represent digits
/// 1-9 respectively, providing efficient storage and fast set operations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet {
    bits: u16,
}

impl DigitSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// The set containing all digits 1-9.
    pub const FULL: Self = Self { bits: 0x1ff };

    /// Inserts a digit, returning `true` if it was not present.
    #[inline]
    pub fn insert(&mut self, digit: Digit) -> bool {
        let was_present = self.contains(digit);
        self.bits |= Self::bit(digit);
        !was_present
    }

    /// Removes a digit, returning `true` if it was present.
    #[inline]
    pub fn remove(&mut self, digit: Digit) -> bool {
        let was_present = self.contains(digit);
        self.bits &= !Self::bit(digit);
        was_present
    }

    /// Returns `true` if the set contains `digit`.
    #[must_use]
    #[inline]
    pub const fn contains(self, digit: Digit) -> bool {
        self.bits & Self::bit(digit) != 0
    }

    /// Returns the number of digits in the set.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Iterates over the digits in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Digit> {
        Digit::ALL.into_iter().filter(move |&d| self.contains(d))
    }

    #[inline]
    const fn bit(digit: Digit) -> u16 {
        1 << digit.index()
    }
}

impl FromIterator<Digit> for DigitSet {
    fn from_iter<I: IntoIterator<Item = Digit>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl BitOr for DigitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitAnd for DigitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl fmt::Debug for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Digit::value)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut set = DigitSet::EMPTY;
        assert!(set.insert(Digit::D3));
        assert!(!set.insert(Digit::D3));
        assert!(set.remove(Digit::D3));
        assert!(!set.remove(Digit::D3));
        assert!(set.is_empty());
    }

    #[test]
    fn test_full_and_iter() {
        assert_eq!(DigitSet::FULL.len(), 9);
        let collected: Vec<_> = DigitSet::FULL.iter().collect();
        assert_eq!(collected, Digit::ALL.to_vec());
    }

    #[test]
    fn test_set_operations() {
        let a: DigitSet = [Digit::D1, Digit::D2, Digit::D3].into_iter().collect();
        let b: DigitSet = [Digit::D2, Digit::D3, Digit::D4].into_iter().collect();
        assert_eq!((a | b).len(), 4);
        assert_eq!(
            (a & b).iter().collect::<Vec<_>>(),
            vec![Digit::D2, Digit::D3]
        );
        assert_eq!(format!("{a:?}"), "{1, 2, 3}");
    }
}
