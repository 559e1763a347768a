//! Connected-component flood fill.

use crate::Shape;

/// Splits the cells selected by `include` into 4-connected components.
///
/// Components are returned in order of their smallest cell index, and each
/// component lists its cells in discovery order starting from that cell.
///
/// # Examples
///
/// ```
/// use gridsmith_core::{Shape, region::components};
///
/// // #.#
/// // #..
/// let filled = [true, false, true, true, false, false];
/// let parts = components(Shape::new(3, 2), |i| filled[i]);
/// assert_eq!(parts, vec![vec![0, 3], vec![2]]);
/// ```
pub fn components<F>(shape: Shape, include: F) -> Vec<Vec<usize>>
where
    F: Fn(usize) -> bool,
{
    let mut visited = vec![false; shape.len()];
    let mut parts = vec![];
    for start in 0..shape.len() {
        if visited[start] || !include(start) {
            continue;
        }
        visited[start] = true;
        let mut part = vec![start];
        let mut next = 0;
        while next < part.len() {
            let cell = part[next];
            next += 1;
            for neighbor in shape.adjacent_indices(cell) {
                if !visited[neighbor] && include(neighbor) {
                    visited[neighbor] = true;
                    part.push(neighbor);
                }
            }
        }
        parts.push(part);
    }
    parts
}

/// Returns `true` if the cells selected by `include` form exactly one
/// component. An empty selection is not connected.
pub fn is_connected<F>(shape: Shape, include: F) -> bool
where
    F: Fn(usize) -> bool,
{
    components(shape, include).len() == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_partition_selection() {
        // ##.#
        // ...#
        // #.##
        let cells = [
            true, true, false, true, //
            false, false, false, true, //
            true, false, true, true,
        ];
        let parts = components(Shape::new(4, 3), |i| cells[i]);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], vec![0, 1]);
        let mut second = parts[1].clone();
        second.sort_unstable();
        assert_eq!(second, vec![3, 7, 10, 11]);
        assert_eq!(parts[2], vec![8]);
        let total: usize = parts.iter().map(Vec::len).sum();
        assert_eq!(total, cells.iter().filter(|&&c| c).count());
    }

    #[test]
    fn test_is_connected() {
        let shape = Shape::square(2);
        assert!(is_connected(shape, |i| i != 3));
        assert!(!is_connected(shape, |i| i == 0 || i == 3));
        assert!(!is_connected(shape, |_| false));
    }
}
