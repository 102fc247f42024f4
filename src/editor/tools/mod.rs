// src/editor/tools/mod.rs
mod brush;
mod room;

pub use brush::{apply_brush, BrushMode, BRUSH_SIZES};
pub use room::RoomCarveTool;

use crate::editor::history::EditHistory;
use crate::map::{CellState, TileGrid};

/// Writes one cell through the open command, capturing the old value
/// first so the write is reversible. Out-of-bounds cells are skipped
/// entirely (never recorded).
fn write_cell(grid: &mut TileGrid, history: &mut EditHistory, x: i32, z: i32, value: CellState) {
    if !grid.in_bounds(x, z) {
        return;
    }
    let old = grid.get(x, z);
    if old == value {
        return;
    }
    history.record_change(x, z, old, value);
    grid.set(x, z, value);
}
