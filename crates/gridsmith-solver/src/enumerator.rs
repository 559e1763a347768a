//! Bounded depth-first solution enumeration.
//!
//! The [`Enumerator`] walks the open cells of a [`SearchSpace`] in the order
//! the space reports them and tries each candidate value in turn. The space
//! applies a value in place and undoes it on backtrack, so no grid is copied
//! per branch. A [`SearchBudget`] caps the number of leaf solutions collected
//! over the whole search; once it runs out the search unwinds and returns what
//! it has found so far.
//!
//! # Examples
//!
//! ```
//! use gridsmith_core::{Grid, MosaicCell};
//! use gridsmith_solver::{Enumerator, MosaicSearch};
//!
//! // A fully revealed 2×2 mosaic with every cell filled has one solution.
//! let mut cells = MosaicCell::grid_from_fills(&Grid::from_rows(vec![
//!     vec![true, true],
//!     vec![true, true],
//! ]));
//! for cell in cells.iter_mut() {
//!     cell.revealed = true;
//! }
//! let mut space = MosaicSearch::new(&cells);
//! let found = Enumerator::uniqueness().enumerate(&mut space);
//! assert_eq!(found.len(), 1);
//! ```

/// A puzzle state the [`Enumerator`] can search.
///
/// Implementations keep their own assignment and bookkeeping and expose it
/// through a mutate-then-undo protocol: [`branch`](Self::branch) applies a
/// value (and whatever it implies), [`rollback`](Self::rollback) restores the
/// state from before that call.
pub trait SearchSpace {
    /// A value a cell can take.
    type Value: Copy + 'static;
    /// Undo information returned by [`branch`](Self::branch).
    type Mark;
    /// A finished assignment, as reported to the caller.
    type Solution;

    /// Candidate values, in the order they are tried.
    const VALUES: &'static [Self::Value];

    /// Returns the next cell to decide, or `None` when every cell is decided.
    fn next_open(&self) -> Option<usize>;

    /// Tries to assign `value` to `cell`.
    ///
    /// Returns `None` if the assignment is infeasible; the space must then be
    /// left exactly as it was.
    fn branch(&mut self, cell: usize, value: Self::Value) -> Option<Self::Mark>;

    /// Undoes the [`branch`](Self::branch) call that returned `mark`.
    fn rollback(&mut self, mark: Self::Mark);

    /// Returns `true` if the complete assignment satisfies every rule.
    ///
    /// Only called once [`next_open`](Self::next_open) returns `None`.
    fn is_solution(&self) -> bool {
        true
    }

    /// Returns `true` if the complete assignment equals the known ground truth.
    fn matches_truth(&self) -> bool {
        false
    }

    /// Captures the current complete assignment.
    fn snapshot(&self) -> Self::Solution;
}

/// A cap on the number of leaf solutions a search may collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    remaining: Option<usize>,
}

impl SearchBudget {
    /// Budget used to decide uniqueness: finding a second solution is enough.
    pub const UNIQUENESS: usize = 2;

    /// Creates a budget of `limit` solutions.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            remaining: Some(limit),
        }
    }

    /// Creates a budget of [`UNIQUENESS`](Self::UNIQUENESS) solutions.
    #[must_use]
    pub const fn uniqueness() -> Self {
        Self::new(Self::UNIQUENESS)
    }

    /// Creates a budget that never runs out.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { remaining: None }
    }

    /// Returns the number of solutions still allowed, `None` if unbounded.
    #[must_use]
    pub const fn remaining(&self) -> Option<usize> {
        self.remaining
    }

    /// Returns `true` once no more solutions may be collected.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.remaining, Some(0))
    }

    /// Records one collected solution.
    pub fn consume(&mut self) {
        if let Some(remaining) = &mut self.remaining {
            *remaining = remaining.saturating_sub(1);
        }
    }
}

/// A leaf solution reported by the [`Enumerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found<S> {
    /// The complete assignment.
    pub solution: S,
    /// Number of branch decisions on the path to this leaf.
    pub guesses: usize,
}

/// Depth-first enumerator over a [`SearchSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enumerator {
    budget: SearchBudget,
    exclude_truth: bool,
}

impl Enumerator {
    /// Creates an enumerator collecting at most `limit` solutions.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            budget: SearchBudget::new(limit),
            exclude_truth: false,
        }
    }

    /// Creates an enumerator with the uniqueness budget.
    #[must_use]
    pub const fn uniqueness() -> Self {
        Self::new(SearchBudget::UNIQUENESS)
    }

    /// Creates an enumerator that collects every solution.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            budget: SearchBudget::unbounded(),
            exclude_truth: false,
        }
    }

    /// Leaves out solutions equal to the ground truth, so that a non-empty
    /// result means an alternate solution exists.
    #[must_use]
    pub const fn excluding_truth(self) -> Self {
        Self {
            exclude_truth: true,
            ..self
        }
    }

    /// Enumerates solutions of `space` with a fresh budget.
    ///
    /// The space is returned to its initial state.
    pub fn enumerate<S>(&self, space: &mut S) -> Vec<Found<S::Solution>>
    where
        S: SearchSpace,
    {
        let mut budget = self.budget;
        self.enumerate_with_budget(space, &mut budget)
    }

    /// Enumerates solutions of `space`, drawing from a caller-owned budget.
    pub fn enumerate_with_budget<S>(
        &self,
        space: &mut S,
        budget: &mut SearchBudget,
    ) -> Vec<Found<S::Solution>>
    where
        S: SearchSpace,
    {
        let mut found = vec![];
        self.search(space, budget, 0, &mut found);
        found
    }

    fn search<S>(
        &self,
        space: &mut S,
        budget: &mut SearchBudget,
        guesses: usize,
        found: &mut Vec<Found<S::Solution>>,
    ) where
        S: SearchSpace,
    {
        if budget.is_exhausted() {
            return;
        }
        let Some(cell) = space.next_open() else {
            if space.is_solution() && !(self.exclude_truth && space.matches_truth()) {
                found.push(Found {
                    solution: space.snapshot(),
                    guesses,
                });
                budget.consume();
            }
            return;
        };
        for &value in S::VALUES {
            if budget.is_exhausted() {
                break;
            }
            if let Some(mark) = space.branch(cell, value) {
                self.search(space, budget, guesses + 1, found);
                space.rollback(mark);
            }
        }
    }
}
