// src/map/room.rs

use serde::{Deserialize, Serialize};

/// Minimum enforced room size on both axes, in cells.
pub const MIN_ROOM_SIZE: i32 = 3;

/// An integer cell position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub z: i32,
}

/// Room extents in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSize {
    pub width: i32,
    pub depth: i32,
}

/// A room record placed by the carving tool.
///
/// A room is metadata over the grid: it is never auto-deleted by tile
/// edits, so it can outlive the floor cells under it (e.g. after an
/// erase stroke over its footprint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub position: GridPos,
    pub size: RoomSize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_spawn_room: bool,
}

impl Room {
    pub fn new(position: GridPos, size: RoomSize, kind: impl Into<String>) -> Self {
        Self {
            position,
            size,
            kind: kind.into(),
            is_spawn_room: false,
        }
    }

    /// The cell at the center of the room footprint.
    pub fn center(&self) -> GridPos {
        GridPos {
            x: self.position.x + self.size.width / 2,
            z: self.position.z + self.size.depth / 2,
        }
    }
}
