// src/editor/mod.rs

pub mod core;
pub mod history;
pub mod tools;
pub mod view;

pub use self::core::{Editor, EditorAction, MapSummary, PointerInput, ROOM_KINDS, SPAWN_ROOM_KIND};
pub use history::{EditCommand, EditHistory, MAX_UNDO};
pub use tools::{BrushMode, BRUSH_SIZES};
pub use view::{CellRange, ViewTransform, MAX_SCALE, MIN_SCALE};

/// The editing tools available in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Floor,
    Erase,
    Room,
    Pan,
}

impl Tool {
    /// Returns a user-friendly name for the tool.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Floor => "Floor",
            Tool::Erase => "Erase",
            Tool::Room => "Room",
            Tool::Pan => "Pan",
        }
    }

    /// The keyboard shortcut shown next to the tool in the UI.
    pub fn shortcut(&self) -> &'static str {
        match self {
            Tool::Floor => "F",
            Tool::Erase => "E",
            Tool::Room => "R",
            Tool::Pan => "P",
        }
    }

    /// Returns all available tools. Useful for UI elements like toolbars.
    pub fn all() -> &'static [Tool] {
        &[Tool::Floor, Tool::Erase, Tool::Room, Tool::Pan]
    }
}
