//! Row-major grid container.

use std::{
    ops::{Index, IndexMut},
    slice,
};

use serde::{Deserialize, Serialize};

use crate::{Position, Shape};

/// A rectangular grid of cells stored in row-major order.
///
/// # Examples
///
/// ```
/// use gridsmith_core::{Grid, Position, Shape};
///
/// let mut grid = Grid::filled(Shape::new(3, 2), false);
/// grid[Position::new(2, 1)] = true;
///
/// assert_eq!(grid.width(), 3);
/// assert_eq!(grid.height(), 2);
/// assert_eq!(grid.as_slice(), &[false, false, false, false, false, true]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridRepr<T>")]
pub struct Grid<T> {
    shape: Shape,
    cells: Vec<T>,
}

#[derive(Deserialize)]
struct GridRepr<T> {
    shape: Shape,
    cells: Vec<T>,
}

/// Error returned when a grid's cell count does not match its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("grid of {width}x{height} needs {expected} cells, got {cells}")]
pub struct GridShapeError {
    width: usize,
    height: usize,
    expected: usize,
    cells: usize,
}

impl<T> TryFrom<GridRepr<T>> for Grid<T> {
    type Error = GridShapeError;

    fn try_from(repr: GridRepr<T>) -> Result<Self, Self::Error> {
        let GridRepr { shape, cells } = repr;
        if cells.len() != shape.len() {
            return Err(GridShapeError {
                width: shape.width(),
                height: shape.height(),
                expected: shape.len(),
                cells: cells.len(),
            });
        }
        Ok(Self { shape, cells })
    }
}

impl<T> Grid<T> {
    /// Creates a grid from row-major cells.
    ///
    /// # Panics
    ///
    /// Panics if `cells.len()` does not match the number of cells in `shape`.
    #[must_use]
    pub fn new(shape: Shape, cells: Vec<T>) -> Self {
        assert_eq!(
            cells.len(),
            shape.len(),
            "grid of {}x{} needs {} cells, got {}",
            shape.width(),
            shape.height(),
            shape.len(),
            cells.len()
        );
        Self { shape, cells }
    }

    /// Creates a grid by calling `f` for every position in row-major order.
    #[must_use]
    pub fn from_fn<F>(shape: Shape, f: F) -> Self
    where
        F: FnMut(Position) -> T,
    {
        Self {
            shape,
            cells: shape.positions().map(f).collect(),
        }
    }

    /// Creates a grid from a list of equally long rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == width),
            "all rows must have {width} cells"
        );
        Self::new(Shape::new(width, height), rows.into_iter().flatten().collect())
    }

    /// Returns the grid dimensions.
    #[must_use]
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the number of columns.
    #[must_use]
    #[inline]
    pub fn width(&self) -> usize {
        self.shape.width()
    }

    /// Returns the number of rows.
    #[must_use]
    #[inline]
    pub fn height(&self) -> usize {
        self.shape.height()
    }

    /// Returns the number of cells.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at `pos`, or `None` if it lies outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.shape
            .contains(pos)
            .then(|| &self.cells[self.shape.index_of(pos)])
    }

    /// Returns the cells in row-major order.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Returns the cells in row-major order, mutably.
    #[must_use]
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Iterates over the cells in row-major order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// Iterates mutably over the cells in row-major order.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.cells.iter_mut()
    }

    /// Iterates over `(position, cell)` pairs in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (Position, &T)> {
        self.shape.positions().zip(&self.cells)
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> slice::Chunks<'_, T> {
        self.cells.chunks(self.shape.width().max(1))
    }

    /// Iterates over the cells of column `x` from top to bottom.
    pub fn column(&self, x: usize) -> impl Iterator<Item = &T> {
        self.cells
            .iter()
            .skip(x)
            .step_by(self.shape.width().max(1))
    }

    /// Builds a new grid of the same shape by mapping every cell.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            shape: self.shape,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Consumes the grid and returns its row-major cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(shape: Shape, value: T) -> Self {
        Self {
            shape,
            cells: vec![value; shape.len()],
        }
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, pos: Position) -> &T {
        &self.cells[self.shape.index_of(pos)]
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut T {
        let i = self.shape.index_of(pos);
        &mut self.cells[i]
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.cells[index]
    }
}

impl<T> IndexMut<usize> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.cells[index]
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
