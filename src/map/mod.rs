// src/map/mod.rs
pub mod grid;
pub mod room;

pub use grid::{CellState, TileGrid};
pub use room::{GridPos, Room, RoomSize, MIN_ROOM_SIZE};
