// src/map/grid.rs

/// The state of a single cell in the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Void,
    Floor,
}

/// A rectangular, mutable grid of cells addressed by `(x, z)`.
///
/// All accesses are bounds-checked: reads outside the grid return
/// [`CellState::Void`] and writes outside the grid are silently dropped.
/// The grid never resizes and never panics on bad coordinates. It also
/// keeps no history of its own; callers that need reversibility read the
/// old value with [`TileGrid::get`] before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: i32,
    depth: i32,
    // Flat storage in x-major order: index = x * depth + z. The tile
    // codec relies on this ordering.
    cells: Vec<CellState>,
}

impl TileGrid {
    /// Creates a grid of `width` x `depth` cells, all `Void`.
    pub fn new(width: i32, depth: i32) -> Self {
        let width = width.max(0);
        let depth = depth.max(0);
        Self {
            width,
            depth,
            cells: vec![CellState::Void; (width as usize) * (depth as usize)],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Whether `(x, z)` addresses a cell inside the grid.
    pub fn in_bounds(&self, x: i32, z: i32) -> bool {
        x >= 0 && x < self.width && z >= 0 && z < self.depth
    }

    /// Returns the cell at `(x, z)`, or `Void` for any out-of-bounds coordinate.
    pub fn get(&self, x: i32, z: i32) -> CellState {
        if self.in_bounds(x, z) {
            self.cells[(x * self.depth + z) as usize]
        } else {
            CellState::Void
        }
    }

    /// Overwrites the cell at `(x, z)`. Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, z: i32, value: CellState) {
        if self.in_bounds(x, z) {
            self.cells[(x * self.depth + z) as usize] = value;
        }
    }

    /// Total number of `Floor` cells.
    ///
    /// O(width x depth); only called on explicit refresh events, never
    /// per frame.
    pub fn count_floor(&self) -> usize {
        self.cells.iter().filter(|c| **c == CellState::Floor).count()
    }

    /// Iterates all cells in storage order as `(x, z, state)`.
    pub fn iter_cells(&self) -> impl Iterator<Item = (i32, i32, CellState)> + '_ {
        self.cells.iter().enumerate().map(move |(i, c)| {
            let i = i as i32;
            (i / self.depth, i % self.depth, *c)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_void() {
        let grid = TileGrid::new(10, 8);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.depth(), 8);
        assert_eq!(grid.count_floor(), 0);
        assert_eq!(grid.get(0, 0), CellState::Void);
        assert_eq!(grid.get(9, 7), CellState::Void);
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = TileGrid::new(10, 10);
        grid.set(3, 4, CellState::Floor);
        assert_eq!(grid.get(3, 4), CellState::Floor);
        grid.set(3, 4, CellState::Void);
        assert_eq!(grid.get(3, 4), CellState::Void);
    }

    #[test]
    fn test_out_of_bounds_get_returns_void() {
        let grid = TileGrid::new(5, 5);
        assert_eq!(grid.get(-1, 0), CellState::Void);
        assert_eq!(grid.get(0, -1), CellState::Void);
        assert_eq!(grid.get(5, 0), CellState::Void);
        assert_eq!(grid.get(0, 5), CellState::Void);
    }

    #[test]
    fn test_out_of_bounds_set_is_noop() {
        let mut grid = TileGrid::new(5, 5);
        grid.set(-1, 0, CellState::Floor);
        grid.set(5, 0, CellState::Floor);
        grid.set(0, -1, CellState::Floor);
        grid.set(0, 5, CellState::Floor);
        assert_eq!(grid.count_floor(), 0);
    }

    #[test]
    fn test_count_floor() {
        let mut grid = TileGrid::new(4, 4);
        grid.set(0, 0, CellState::Floor);
        grid.set(1, 2, CellState::Floor);
        grid.set(3, 3, CellState::Floor);
        // Overwriting with the same value must not double-count.
        grid.set(0, 0, CellState::Floor);
        assert_eq!(grid.count_floor(), 3);
    }

    #[test]
    fn test_iter_cells_order() {
        let mut grid = TileGrid::new(2, 3);
        grid.set(1, 0, CellState::Floor);
        let cells: Vec<_> = grid.iter_cells().collect();
        assert_eq!(cells.len(), 6);
        // x-major order: (0,0) (0,1) (0,2) (1,0) ...
        assert_eq!(cells[0], (0, 0, CellState::Void));
        assert_eq!(cells[3], (1, 0, CellState::Floor));
    }
}
