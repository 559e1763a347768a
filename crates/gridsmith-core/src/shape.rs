//! Grid geometry: positions, dimensions and neighborhoods.

use serde::{Deserialize, Serialize};

/// A cell coordinate, `x` being the column and `y` the row.
///
/// # Examples
///
/// ```
/// use gridsmith_core::Position;
///
/// let pos = Position::new(3, 1);
/// assert_eq!(pos.x(), 3);
/// assert_eq!(pos.y(), 1);
/// assert_eq!(pos.to_string(), "(3, 1)");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("({x}, {y})")]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    /// Creates a position from a column and a row.
    #[must_use]
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the column.
    #[must_use]
    #[inline]
    pub const fn x(self) -> usize {
        self.x
    }

    /// Returns the row.
    #[must_use]
    #[inline]
    pub const fn y(self) -> usize {
        self.y
    }
}

/// The dimensions of a rectangular grid.
///
/// `Shape` converts between [`Position`]s and row-major cell indices and
/// enumerates the neighborhoods the puzzle rules are stated in. Search code
/// works on plain indices, so most helpers have an index flavour as well.
///
/// # Examples
///
/// ```
/// use gridsmith_core::{Position, Shape};
///
/// let shape = Shape::new(5, 4);
/// assert_eq!(shape.len(), 20);
/// assert_eq!(shape.index_of(Position::new(2, 1)), 7);
/// assert_eq!(shape.position_of(7), Position::new(2, 1));
///
/// // Corners have two orthogonal neighbors and a 2×2 block.
/// assert_eq!(shape.adjacent(Position::new(0, 0)).count(), 2);
/// assert_eq!(shape.block(Position::new(0, 0)).count(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    width: usize,
    height: usize,
}

impl Shape {
    /// Creates a shape of `width` columns and `height` rows.
    #[must_use]
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Creates a square shape.
    #[must_use]
    #[inline]
    pub const fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    /// Returns the number of columns.
    #[must_use]
    #[inline]
    pub const fn width(self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    #[inline]
    pub const fn height(self) -> usize {
        self.height
    }

    /// Returns the number of cells.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.width * self.height
    }

    /// Returns `true` if the shape has no cells.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `pos` lies inside the shape.
    #[must_use]
    #[inline]
    pub const fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Converts a position into its row-major index.
    #[must_use]
    #[inline]
    pub const fn index_of(self, pos: Position) -> usize {
        debug_assert!(self.contains(pos));
        pos.y * self.width + pos.x
    }

    /// Converts a row-major index back into a position.
    #[must_use]
    #[inline]
    pub const fn position_of(self, index: usize) -> Position {
        debug_assert!(index < self.len());
        Position::new(index % self.width, index / self.width)
    }

    /// Returns all positions in row-major order.
    pub fn positions(self) -> impl DoubleEndedIterator<Item = Position> + ExactSizeIterator {
        (0..self.len()).map(move |i| self.position_of(i))
    }

    /// Returns the orthogonal neighbors of `pos` that lie inside the shape.
    ///
    /// The order is left, right, up, down.
    pub fn adjacent(self, pos: Position) -> impl Iterator<Item = Position> {
        let Position { x, y } = pos;
        [
            (x > 0).then(|| Position::new(x - 1, y)),
            (x + 1 < self.width).then(|| Position::new(x + 1, y)),
            (y > 0).then(|| Position::new(x, y - 1)),
            (y + 1 < self.height).then(|| Position::new(x, y + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// Index flavour of [`adjacent`](Self::adjacent).
    pub fn adjacent_indices(self, index: usize) -> impl Iterator<Item = usize> {
        self.adjacent(self.position_of(index))
            .map(move |pos| self.index_of(pos))
    }

    /// Returns the 3×3 block centred on `pos`, clipped to the shape.
    ///
    /// The block includes `pos` itself and is yielded in row-major order, so it
    /// holds 4 cells in a corner, 6 on an edge and 9 elsewhere.
    pub fn block(self, pos: Position) -> impl Iterator<Item = Position> {
        let x_range = pos.x.saturating_sub(1)..(pos.x + 2).min(self.width);
        let y_range = pos.y.saturating_sub(1)..(pos.y + 2).min(self.height);
        y_range.flat_map(move |y| x_range.clone().map(move |x| Position::new(x, y)))
    }

    /// Index flavour of [`block`](Self::block).
    pub fn block_indices(self, index: usize) -> impl Iterator<Item = usize> {
        self.block(self.position_of(index))
            .map(move |pos| self.index_of(pos))
    }

    /// Returns the top-left corners of every 2×2 square in the shape.
    pub fn squares(self) -> impl Iterator<Item = [usize; 4]> {
        let w = self.width;
        (0..self.height.saturating_sub(1)).flat_map(move |y| {
            (0..w.saturating_sub(1)).map(move |x| {
                let i = y * w + x;
                [i, i + 1, i + w, i + w + 1]
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let shape = Shape::new(7, 3);
        for (i, pos) in shape.positions().enumerate() {
            assert_eq!(shape.index_of(pos), i);
            assert_eq!(shape.position_of(i), pos);
        }
    }

    #[test]
    fn test_adjacent_order_and_clipping() {
        let shape = Shape::square(3);
        let centre: Vec<_> = shape.adjacent(Position::new(1, 1)).collect();
        assert_eq!(
            centre,
            vec![
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );
        assert_eq!(shape.adjacent(Position::new(2, 2)).count(), 2);
        assert_eq!(shape.adjacent(Position::new(1, 0)).count(), 3);
    }

    #[test]
    fn test_block_sizes() {
        let shape = Shape::square(5);
        assert_eq!(shape.block(Position::new(0, 0)).count(), 4);
        assert_eq!(shape.block(Position::new(2, 0)).count(), 6);
        assert_eq!(shape.block(Position::new(0, 3)).count(), 6);
        assert_eq!(shape.block(Position::new(2, 2)).count(), 9);
        assert!(shape.block(Position::new(2, 2)).any(|p| p == Position::new(2, 2)));
    }

    #[test]
    fn test_squares() {
        let shape = Shape::new(3, 2);
        let squares: Vec<_> = shape.squares().collect();
        assert_eq!(squares, vec![[0, 1, 3, 4], [1, 2, 4, 5]]);
        assert_eq!(Shape::new(1, 5).squares().count(), 0);
    }
}
