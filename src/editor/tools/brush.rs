// src/editor/tools/brush.rs

use crate::editor::history::EditHistory;
use crate::map::{CellState, TileGrid};

/// Brush sizes offered by the editor (also bound to keys 1-5).
pub const BRUSH_SIZES: [i32; 5] = [1, 3, 5, 10, 20];

/// What a brush application writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushMode {
    Floor,
    Erase,
}

impl BrushMode {
    fn value(self) -> CellState {
        match self {
            BrushMode::Floor => CellState::Floor,
            BrushMode::Erase => CellState::Void,
        }
    }
}

/// Applies one square brush stamp centered on `(center_x, center_z)`,
/// routing every changed cell through the history's open command.
///
/// The half-extent is `size / 2` (integer division) on both sides
/// inclusive, so even sizes cover `size + 1` cells per axis: size 10
/// spans `center-5 ..= center+5`. That asymmetry matches the editor's
/// long-standing behavior and is kept deliberately.
pub fn apply_brush(
    mode: BrushMode,
    center_x: i32,
    center_z: i32,
    size: i32,
    grid: &mut TileGrid,
    history: &mut EditHistory,
) {
    let half = size / 2;
    let value = mode.value();
    for x in (center_x - half)..=(center_x + half) {
        for z in (center_z - half)..=(center_z + half) {
            super::write_cell(grid, history, x, z, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::CellState::{Floor, Void};

    fn stamp(mode: BrushMode, cx: i32, cz: i32, size: i32, grid: &mut TileGrid) -> EditHistory {
        let mut history = EditHistory::new();
        history.begin_edit();
        apply_brush(mode, cx, cz, size, grid, &mut history);
        history.end_edit();
        history
    }

    #[test]
    fn test_size_one_paints_single_cell() {
        let mut grid = TileGrid::new(20, 20);
        stamp(BrushMode::Floor, 4, 7, 1, &mut grid);
        assert_eq!(grid.count_floor(), 1);
        assert_eq!(grid.get(4, 7), Floor);
    }

    #[test]
    fn test_size_ten_footprint_is_eleven_cells_wide() {
        let mut grid = TileGrid::new(200, 200);
        stamp(BrushMode::Floor, 50, 50, 10, &mut grid);

        assert_eq!(grid.count_floor(), 121);
        for x in 45..=55 {
            for z in 45..=55 {
                assert_eq!(grid.get(x, z), Floor, "missing cell ({x}, {z})");
            }
        }
        assert_eq!(grid.get(44, 50), Void);
        assert_eq!(grid.get(56, 50), Void);
        assert_eq!(grid.get(50, 44), Void);
        assert_eq!(grid.get(50, 56), Void);
    }

    #[test]
    fn test_odd_sizes_center_exactly() {
        let mut grid = TileGrid::new(20, 20);
        stamp(BrushMode::Floor, 10, 10, 3, &mut grid);
        assert_eq!(grid.count_floor(), 9);
        assert_eq!(grid.get(9, 9), Floor);
        assert_eq!(grid.get(11, 11), Floor);
        assert_eq!(grid.get(8, 10), Void);
    }

    #[test]
    fn test_erase_clears_footprint() {
        let mut grid = TileGrid::new(20, 20);
        stamp(BrushMode::Floor, 10, 10, 5, &mut grid);
        assert_eq!(grid.count_floor(), 25);

        stamp(BrushMode::Erase, 10, 10, 3, &mut grid);
        assert_eq!(grid.count_floor(), 25 - 9);
        assert_eq!(grid.get(10, 10), Void);
        assert_eq!(grid.get(8, 8), Floor);
    }

    #[test]
    fn test_brush_clips_at_grid_edge() {
        let mut grid = TileGrid::new(10, 10);
        let history = stamp(BrushMode::Floor, 0, 0, 5, &mut grid);
        // Only the in-bounds quadrant of the 5x5 stamp lands.
        assert_eq!(grid.count_floor(), 9);
        // And only those cells were recorded for undo.
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_overlapping_stamps_in_one_stroke_undo_cleanly() {
        let mut grid = TileGrid::new(30, 30);
        let mut history = EditHistory::new();
        history.begin_edit();
        apply_brush(BrushMode::Floor, 10, 10, 5, &mut grid, &mut history);
        apply_brush(BrushMode::Floor, 12, 10, 5, &mut grid, &mut history);
        assert!(history.end_edit());

        assert!(history.undo(&mut grid));
        assert_eq!(grid.count_floor(), 0);
    }
}
