use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// `ndarray` index for a position.
pub(crate) const fn nd((x, y): Coord2) -> (usize, usize) {
    (x as usize, y as usize)
}

/// Fixed-size 2D index space with bounds-checked neighbor enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: Coord,
    height: Coord,
}

impl Grid {
    pub const fn new(width: Coord, height: Coord) -> Self {
        // a zero-sized axis is never meaningful
        let width = if width == 0 { 1 } else { width };
        let height = if height == 0 { 1 } else { height };
        Self { width, height }
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn in_bounds(&self, (x, y): Coord2) -> bool {
        x < self.width && y < self.height
    }

    /// The up-to-8 orthogonal/diagonal positions around `center`, clipped
    /// to the grid. Never yields `center` itself.
    pub fn neighbors(&self, center: Coord2) -> NeighborIter {
        NeighborIter {
            center,
            bounds: self.size(),
            index: 0,
        }
    }

    pub(crate) const fn dim(&self) -> (usize, usize) {
        nd(self.size())
    }
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `center`, returning a value only while it stays in
/// bounds.
fn offset(center: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let x = center.0.checked_add_signed(delta.0)?;
    let y = center.1.checked_add_signed(delta.1)?;
    (x < bounds.0 && y < bounds.1).then_some((x, y))
}

/// Lazily walks the offset table, skipping clipped positions.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = OFFSETS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(pos) = offset(self.center, delta, self.bounds) {
                return Some(pos);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(grid: &Grid, center: Coord2) -> Vec<Coord2> {
        grid.neighbors(center).collect()
    }

    #[test]
    fn corner_has_three_neighbors() {
        let grid = Grid::new(8, 8);
        let neighbors = collect(&grid, (0, 0));
        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.iter().all(|&pos| grid.in_bounds(pos)));
        assert!(!neighbors.contains(&(0, 0)));
    }

    #[test]
    fn edge_has_five_neighbors() {
        let grid = Grid::new(8, 8);
        assert_eq!(collect(&grid, (0, 4)).len(), 5);
        assert_eq!(collect(&grid, (4, 7)).len(), 5);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let grid = Grid::new(8, 8);
        let neighbors = collect(&grid, (4, 4));
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(4, 4)));
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let grid = Grid::new(1, 1);
        assert!(collect(&grid, (0, 0)).is_empty());
    }

    #[test]
    fn neighbor_order_is_deterministic() {
        let grid = Grid::new(5, 5);
        assert_eq!(collect(&grid, (2, 2)), collect(&grid, (2, 2)));
    }

    #[test]
    fn zero_sized_axes_are_bumped_to_one() {
        let grid = Grid::new(0, 3);
        assert_eq!(grid.size(), (1, 3));
        assert_eq!(grid.total_cells(), 3);
    }
}
