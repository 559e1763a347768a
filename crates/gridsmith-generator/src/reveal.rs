//! Reveal-based clue placement shared by mosaic and sudoku.

use rand::{Rng, seq::SliceRandom as _};

/// A puzzle whose per-cell clues can be revealed one at a time.
pub(crate) trait RevealTarget {
    /// A complete assignment that differs from the ground truth.
    type Alternate;

    /// Number of cells.
    fn cell_count(&self) -> usize;

    /// Returns `true` if the clue at `cell` is shown.
    fn is_revealed(&self, cell: usize) -> bool;

    /// Shows the clue at `cell`.
    fn reveal(&mut self, cell: usize);

    /// Returns alternates consistent with the shown clues, if any.
    fn alternates(&self) -> Vec<Self::Alternate>;

    /// Returns `true` if revealing `cell` would rule out `alternate`.
    fn disagrees(&self, alternate: &Self::Alternate, cell: usize) -> bool;
}

/// Reveals clues until no alternate solution remains.
///
/// Each alternate is eliminated by revealing a uniformly chosen hidden cell
/// where it disagrees with the ground truth. Returns `false` if an alternate
/// has no such cell left.
pub(crate) fn reveal_until_unique<T, R>(target: &mut T, rng: &mut R) -> bool
where
    T: RevealTarget,
    R: Rng + ?Sized,
{
    let mut order = (0..target.cell_count()).collect::<Vec<_>>();
    loop {
        let mut alternates = target.alternates();
        if alternates.is_empty() {
            return true;
        }
        while let Some(alternate) = alternates.first() {
            order.shuffle(rng);
            let Some(cell) = order
                .iter()
                .copied()
                .find(|&cell| !target.is_revealed(cell) && target.disagrees(alternate, cell))
            else {
                return false;
            };
            target.reveal(cell);
            alternates.retain(|alternate| !target.disagrees(alternate, cell));
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    /// A row of bits where every hidden bit is free.
    struct Bits {
        truth: Vec<bool>,
        revealed: Vec<bool>,
    }

    impl RevealTarget for Bits {
        type Alternate = Vec<bool>;

        fn cell_count(&self) -> usize {
            self.truth.len()
        }

        fn is_revealed(&self, cell: usize) -> bool {
            self.revealed[cell]
        }

        fn reveal(&mut self, cell: usize) {
            self.revealed[cell] = true;
        }

        fn alternates(&self) -> Vec<Vec<bool>> {
            // Flip the first hidden bit, if there is one.
            self.revealed
                .iter()
                .position(|r| !r)
                .map(|i| {
                    let mut alt = self.truth.clone();
                    alt[i] = !alt[i];
                    alt
                })
                .into_iter()
                .collect()
        }

        fn disagrees(&self, alternate: &Vec<bool>, cell: usize) -> bool {
            alternate[cell] != self.truth[cell]
        }
    }

    #[test]
    fn test_reveals_everything_when_every_bit_is_free() {
        let mut target = Bits {
            truth: vec![true, false, true, true],
            revealed: vec![false; 4],
        };
        let mut rng = Pcg64::seed_from_u64(7);
        assert!(reveal_until_unique(&mut target, &mut rng));
        assert!(target.revealed.iter().all(|&r| r));
    }

    #[test]
    fn test_already_unique_reveals_nothing() {
        let mut target = Bits {
            truth: vec![true, false],
            revealed: vec![true, true],
        };
        let mut rng = Pcg64::seed_from_u64(7);
        assert!(reveal_until_unique(&mut target, &mut rng));
    }
}
