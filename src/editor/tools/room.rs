// src/editor/tools/room.rs

use crate::editor::history::EditHistory;
use crate::map::{CellState, GridPos, Room, RoomSize, TileGrid, MIN_ROOM_SIZE};

/// Two-point drag interaction that carves a rectangular room.
///
/// Idle -> (press) -> Dragging -> (release) -> Idle. While dragging the
/// current rectangle is exposed for a live preview; nothing touches the
/// grid until release. A right-click mid-drag cancels with no effect.
#[derive(Debug, Default)]
pub struct RoomCarveTool {
    drag: Option<(GridPos, GridPos)>,
}

impl RoomCarveTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts a drag at the pressed cell.
    pub fn begin(&mut self, x: i32, z: i32) {
        let start = GridPos { x, z };
        self.drag = Some((start, start));
    }

    /// Updates the moving corner while dragging; ignored when idle.
    pub fn update(&mut self, x: i32, z: i32) {
        if let Some((_, end)) = self.drag.as_mut() {
            *end = GridPos { x, z };
        }
    }

    /// The current corner-ordered preview rectangle `(min, max)`, if a
    /// drag is in progress. Not clamped to the grid; the preview simply
    /// extends past the edge.
    pub fn preview_rect(&self) -> Option<(GridPos, GridPos)> {
        self.drag.map(|(start, end)| Self::ordered(start, end))
    }

    /// Abandons the drag with no grid or room change.
    pub fn cancel(&mut self) {
        self.drag = None;
    }

    /// Finishes the drag: clamps the rectangle to the grid, rejects
    /// anything smaller than 3x3, otherwise carves floor through one
    /// command and returns the new room record. `None` means nothing
    /// was changed (no drag in progress, or rectangle too small).
    pub fn finish(
        &mut self,
        grid: &mut TileGrid,
        history: &mut EditHistory,
        kind: &str,
    ) -> Option<Room> {
        let (start, end) = self.drag.take()?;
        let (min, max) = Self::ordered(start, end);

        let min_x = min.x.clamp(0, grid.width() - 1);
        let max_x = max.x.clamp(0, grid.width() - 1);
        let min_z = min.z.clamp(0, grid.depth() - 1);
        let max_z = max.z.clamp(0, grid.depth() - 1);

        let width = max_x - min_x + 1;
        let depth = max_z - min_z + 1;
        if width < MIN_ROOM_SIZE || depth < MIN_ROOM_SIZE {
            return None;
        }

        history.begin_edit();
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                super::write_cell(grid, history, x, z, CellState::Floor);
            }
        }
        history.end_edit();

        Some(Room::new(
            GridPos { x: min_x, z: min_z },
            RoomSize { width, depth },
            kind,
        ))
    }

    fn ordered(a: GridPos, b: GridPos) -> (GridPos, GridPos) {
        (
            GridPos {
                x: a.x.min(b.x),
                z: a.z.min(b.z),
            },
            GridPos {
                x: a.x.max(b.x),
                z: a.z.max(b.z),
            },
        )
    }
}
