// src/editor/core.rs

use std::path::{Path, PathBuf};

use log::{debug, error, info};
use rfd::FileDialog;

use crate::document::{MapDocument, DEFAULT_MAP_SIZE};
use crate::editor::history::EditHistory;
use crate::editor::tools::{apply_brush, BrushMode, RoomCarveTool, BRUSH_SIZES};
use crate::editor::Tool;
use crate::map::Room;

/// Room type tags offered by the editor. Carving with the spawn tag also
/// moves the map's spawn position.
pub const ROOM_KINDS: [&str; 5] = ["normal", "spawn", "treasure", "boss", "corridor"];
pub const SPAWN_ROOM_KIND: &str = "spawn";

/// A discrete input intent, dispatched identically no matter how the
/// surrounding UI produced it (button, key, menu entry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    SelectTool(Tool),
    SelectBrushSize(i32),
    Undo,
    Redo,
}

/// One frame's worth of pointer state over the canvas, already mapped
/// to grid coordinates by the view transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerInput {
    pub cell: (i32, i32),
    pub primary_pressed: bool,
    pub primary_down: bool,
    pub primary_released: bool,
    pub secondary_pressed: bool,
    pub secondary_down: bool,
    pub secondary_released: bool,
}

/// Which button owns the brush stroke in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrokeButton {
    Primary,
    Secondary,
}

/// Cached map statistics for the side panel. Refreshed on commit, undo,
/// redo and load; never recomputed per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapSummary {
    pub floor_cells: usize,
    pub room_count: usize,
}

/// The editor session: exclusive owner of the map document and the edit
/// history. Constructed once and handed to the UI panels by reference;
/// there is no global lookup.
pub struct Editor {
    document: MapDocument,
    history: EditHistory,

    current_tool: Tool,
    brush_size: i32,
    room_kind: String,

    carve: RoomCarveTool,
    stroke: Option<(BrushMode, StrokeButton)>,

    summary: MapSummary,

    /// Messages or status for UI.
    pub status_message: String,
    pub error_message: Option<String>,
    pub show_side_panel: bool,

    is_dirty: bool,
    needs_redraw: bool,
    current_path: Option<PathBuf>,

    // Bumped whenever the grid is replaced wholesale so the canvas knows
    // to recenter its view.
    map_revision: u64,
}

impl Editor {
    pub fn new() -> Self {
        let mut editor = Self {
            document: MapDocument::new(DEFAULT_MAP_SIZE, DEFAULT_MAP_SIZE),
            history: EditHistory::new(),
            current_tool: Tool::Floor,
            brush_size: BRUSH_SIZES[1],
            room_kind: ROOM_KINDS[0].to_string(),
            carve: RoomCarveTool::new(),
            stroke: None,
            summary: MapSummary::default(),
            status_message: "New map created.".to_string(),
            error_message: None,
            show_side_panel: true,
            is_dirty: false,
            needs_redraw: true,
            current_path: None,
            map_revision: 0,
        };
        editor.refresh_summary();
        editor
    }

    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    pub fn current_tool(&self) -> Tool {
        self.current_tool
    }

    /// Sets the current tool, abandoning any gesture in flight.
    pub fn set_current_tool(&mut self, tool: Tool) {
        self.abort_gestures();
        self.current_tool = tool;
        self.status_message = format!("Selected tool: {}", tool.name());
    }

    pub fn brush_size(&self) -> i32 {
        self.brush_size
    }

    /// Sets the brush size; anything outside [`BRUSH_SIZES`] is ignored.
    pub fn set_brush_size(&mut self, size: i32) {
        if BRUSH_SIZES.contains(&size) {
            self.brush_size = size;
            self.status_message = format!("Brush size: {}", size);
        }
    }

    pub fn room_kind(&self) -> &str {
        &self.room_kind
    }

    pub fn set_room_kind(&mut self, kind: impl Into<String>) {
        self.room_kind = kind.into();
    }

    pub fn summary(&self) -> MapSummary {
        self.summary
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.is_dirty
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn map_revision(&self) -> u64 {
        self.map_revision
    }

    /// True once per redraw-worthy change; the canvas uses this to
    /// request a repaint.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    // ----------------- Action dispatch -----------------

    /// Single entry point for discrete input intents.
    pub fn apply_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::SelectTool(tool) => self.set_current_tool(tool),
            EditorAction::SelectBrushSize(size) => self.set_brush_size(size),
            EditorAction::Undo => self.undo(),
            EditorAction::Redo => self.redo(),
        }
    }

    /// Reverts the most recent committed gesture.
    pub fn undo(&mut self) {
        if self.history.undo(&mut self.document.grid) {
            self.status_message = "Undo.".to_string();
            self.after_grid_change();
        }
    }

    /// Re-applies the most recently undone gesture.
    pub fn redo(&mut self) {
        if self.history.redo(&mut self.document.grid) {
            self.status_message = "Redo.".to_string();
            self.after_grid_change();
        }
    }

    // ----------------- Pointer routing -----------------

    /// Routes one frame of pointer state to the active tool's state
    /// machine. Called by the canvas whenever the pointer is over it.
    pub fn handle_pointer(&mut self, input: PointerInput) {
        // The right button cancels a room drag; anywhere else it starts
        // an erase stroke no matter which tool is selected.
        if input.secondary_pressed {
            if self.carve.is_dragging() {
                self.carve.cancel();
                self.request_redraw();
            } else if self.stroke.is_none() {
                self.begin_stroke(BrushMode::Erase, StrokeButton::Secondary);
                self.continue_stroke(input.cell, StrokeButton::Secondary);
            }
        }
        if input.secondary_down {
            self.continue_stroke(input.cell, StrokeButton::Secondary);
        }
        if input.secondary_released {
            self.end_stroke(StrokeButton::Secondary);
        }

        match self.current_tool {
            Tool::Floor | Tool::Erase => {
                let mode = if self.current_tool == Tool::Erase {
                    BrushMode::Erase
                } else {
                    BrushMode::Floor
                };
                if input.primary_pressed && self.stroke.is_none() {
                    self.begin_stroke(mode, StrokeButton::Primary);
                }
                if input.primary_down {
                    self.continue_stroke(input.cell, StrokeButton::Primary);
                }
                if input.primary_released {
                    self.end_stroke(StrokeButton::Primary);
                }
            }
            Tool::Room => {
                if input.primary_pressed {
                    self.carve.begin(input.cell.0, input.cell.1);
                    self.request_redraw();
                } else if input.primary_down && self.carve.is_dragging() {
                    self.carve.update(input.cell.0, input.cell.1);
                    self.request_redraw();
                }
                if input.primary_released && self.carve.is_dragging() {
                    self.finish_room();
                }
            }
            // Panning is a pure view operation; the canvas owns it.
            Tool::Pan => {}
        }
    }

    /// The in-flight room rectangle for the canvas preview, if any.
    pub fn room_preview(&self) -> Option<(crate::map::GridPos, crate::map::GridPos)> {
        self.carve.preview_rect()
    }

    fn begin_stroke(&mut self, mode: BrushMode, button: StrokeButton) {
        self.history.begin_edit();
        self.stroke = Some((mode, button));
    }

    fn continue_stroke(&mut self, cell: (i32, i32), button: StrokeButton) {
        if let Some((mode, owner)) = self.stroke {
            if owner == button {
                apply_brush(
                    mode,
                    cell.0,
                    cell.1,
                    self.brush_size,
                    &mut self.document.grid,
                    &mut self.history,
                );
                self.request_redraw();
            }
        }
    }

    fn end_stroke(&mut self, button: StrokeButton) {
        if matches!(self.stroke, Some((_, owner)) if owner == button) {
            self.stroke = None;
            if self.history.end_edit() {
                self.status_message = "Stroke committed.".to_string();
                self.after_grid_change();
            }
        }
    }

    fn finish_room(&mut self) {
        let kind = self.room_kind.clone();
        match self.carve.finish(&mut self.document.grid, &mut self.history, &kind) {
            Some(mut room) => {
                if kind == SPAWN_ROOM_KIND {
                    for existing in &mut self.document.rooms {
                        existing.is_spawn_room = false;
                    }
                    room.is_spawn_room = true;
                    self.document.spawn_position = Some(room.center());
                }
                self.status_message = format!(
                    "Carved {} room {}x{} at ({}, {}).",
                    room.kind, room.size.width, room.size.depth, room.position.x, room.position.z
                );
                self.document.rooms.push(room);
                self.after_grid_change();
            }
            None => {
                // Too small or fully off-grid; rejected without fanfare.
                debug!("room drag rejected (smaller than 3x3 after clamping)");
                self.request_redraw();
            }
        }
    }

    fn abort_gestures(&mut self) {
        self.carve.cancel();
        if self.stroke.take().is_some() {
            // Commit whatever was already painted; brush strokes have no
            // cancel path.
            if self.history.end_edit() {
                self.after_grid_change();
            }
        }
    }

    // ----------------- Room management -----------------

    pub fn rooms(&self) -> &[Room] {
        &self.document.rooms
    }

    /// Deletes one room record. Tiles under it are left alone.
    pub fn delete_room(&mut self, index: usize) {
        if index < self.document.rooms.len() {
            let room = self.document.rooms.remove(index);
            self.status_message = format!(
                "Deleted {} room at ({}, {}).",
                room.kind, room.position.x, room.position.z
            );
            self.mark_dirty();
            self.refresh_summary();
            self.request_redraw();
        }
    }

    /// Deletes every room record, keeping all tiles.
    pub fn clear_rooms(&mut self) {
        if !self.document.rooms.is_empty() {
            self.document.rooms.clear();
            self.status_message = "Cleared all rooms.".to_string();
            self.mark_dirty();
            self.refresh_summary();
            self.request_redraw();
        }
    }

    // ----------------- Document management -----------------

    /// Replaces the session with a fresh empty map.
    pub fn new_document(&mut self) {
        self.replace_document(
            MapDocument::new(DEFAULT_MAP_SIZE, DEFAULT_MAP_SIZE),
            None,
            "Created new map.",
        );
    }

    /// Loads a map from `path`, replacing the session on success.
    pub fn open_from_path(&mut self, path: PathBuf) {
        match MapDocument::load_from_path(&path) {
            Ok(doc) => {
                let status = format!("Loaded map: {}", path.display());
                info!("{}", status);
                self.replace_document(doc, Some(path), &status);
            }
            Err(e) => {
                error!("failed to load {}: {}", path.display(), e);
                self.error_message = Some(format!("Failed to load map: {}", e));
            }
        }
    }

    /// Opens a file dialog and loads the picked map.
    pub fn show_open_dialog(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("Map Files", &["json"])
            .pick_file()
        {
            self.open_from_path(path);
        }
    }

    /// Saves to the current path, or falls back to Save As.
    pub fn save_document_wrapper(&mut self) {
        match self.current_path.clone() {
            Some(path) => self.save_to_path(path),
            None => self.show_save_dialog(),
        }
    }

    /// Opens a save dialog and writes the document to the picked path.
    pub fn show_save_dialog(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("Map Files", &["json"])
            .set_file_name("map.json")
            .save_file()
        {
            self.save_to_path(path);
        }
    }

    fn save_to_path(&mut self, path: PathBuf) {
        match self.document.save_to_path(&path) {
            Ok(()) => {
                self.status_message = format!("Saved map: {}", path.display());
                info!("{}", self.status_message);
                self.current_path = Some(path);
                self.is_dirty = false;
                self.error_message = None;
            }
            Err(e) => {
                error!("failed to save {}: {}", path.display(), e);
                self.error_message = Some(format!("Failed to save map: {}", e));
            }
        }
    }

    fn replace_document(&mut self, document: MapDocument, path: Option<PathBuf>, status: &str) {
        self.document = document;
        self.history.clear();
        self.carve.cancel();
        self.stroke = None;
        self.current_path = path;
        self.is_dirty = false;
        self.error_message = None;
        self.status_message = status.to_string();
        self.map_revision += 1;
        self.refresh_summary();
        self.request_redraw();
    }

    // ----------------- Internal bookkeeping -----------------

    fn after_grid_change(&mut self) {
        self.mark_dirty();
        self.refresh_summary();
        self.request_redraw();
    }

    fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    fn refresh_summary(&mut self) {
        self.summary = MapSummary {
            floor_cells: self.document.grid.count_floor(),
            room_count: self.document.rooms.len(),
        };
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::CellState::{Floor, Void};

    fn press_at(cell: (i32, i32)) -> PointerInput {
        PointerInput {
            cell,
            primary_pressed: true,
            primary_down: true,
            ..Default::default()
        }
    }

    fn drag_to(cell: (i32, i32)) -> PointerInput {
        PointerInput {
            cell,
            primary_down: true,
            ..Default::default()
        }
    }

    fn release_at(cell: (i32, i32)) -> PointerInput {
        PointerInput {
            cell,
            primary_released: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_action_dispatch() {
        let mut editor = Editor::new();
        editor.apply_action(EditorAction::SelectTool(Tool::Room));
        assert_eq!(editor.current_tool(), Tool::Room);

        editor.apply_action(EditorAction::SelectBrushSize(20));
        assert_eq!(editor.brush_size(), 20);

        // Sizes outside the allowed set are ignored.
        editor.apply_action(EditorAction::SelectBrushSize(7));
        assert_eq!(editor.brush_size(), 20);
    }

    #[test]
    fn test_paint_stroke_commits_one_command() {
        let mut editor = Editor::new();
        editor.set_brush_size(1);

        editor.handle_pointer(press_at((5, 5)));
        editor.handle_pointer(drag_to((6, 5)));
        editor.handle_pointer(drag_to((7, 5)));
        editor.handle_pointer(release_at((7, 5)));

        assert_eq!(editor.document().grid.get(5, 5), Floor);
        assert_eq!(editor.document().grid.get(7, 5), Floor);
        assert_eq!(editor.summary().floor_cells, 3);
        assert_eq!(editor.undo_len(), 1);

        editor.apply_action(EditorAction::Undo);
        assert_eq!(editor.document().grid.count_floor(), 0);
        assert_eq!(editor.summary().floor_cells, 0);

        editor.apply_action(EditorAction::Redo);
        assert_eq!(editor.summary().floor_cells, 3);
    }

    #[test]
    fn test_empty_stroke_leaves_history_untouched() {
        let mut editor = Editor::new();
        editor.set_current_tool(Tool::Erase);
        // Erasing void cells changes nothing.
        editor.handle_pointer(press_at((5, 5)));
        editor.handle_pointer(release_at((5, 5)));
        assert_eq!(editor.undo_len(), 0);
    }

    #[test]
    fn test_right_click_erases_with_floor_tool_selected() {
        let mut editor = Editor::new();
        editor.set_brush_size(1);

        editor.handle_pointer(press_at((5, 5)));
        editor.handle_pointer(release_at((5, 5)));
        assert_eq!(editor.document().grid.get(5, 5), Floor);

        editor.handle_pointer(PointerInput {
            cell: (5, 5),
            secondary_pressed: true,
            secondary_down: true,
            ..Default::default()
        });
        editor.handle_pointer(PointerInput {
            cell: (5, 5),
            secondary_released: true,
            ..Default::default()
        });
        assert_eq!(editor.document().grid.get(5, 5), Void);
        assert_eq!(editor.undo_len(), 2);
    }

    #[test]
    fn test_room_carve_via_pointer() {
        let mut editor = Editor::new();
        editor.set_current_tool(Tool::Room);

        editor.handle_pointer(press_at((10, 10)));
        editor.handle_pointer(drag_to((13, 13)));
        assert!(editor.room_preview().is_some());
        editor.handle_pointer(release_at((13, 13)));

        assert_eq!(editor.rooms().len(), 1);
        assert_eq!(editor.summary().room_count, 1);
        assert_eq!(editor.summary().floor_cells, 16);
        assert!(editor.has_unsaved_changes());
    }

    #[test]
    fn test_room_drag_right_click_cancels() {
        let mut editor = Editor::new();
        editor.set_current_tool(Tool::Room);

        editor.handle_pointer(press_at((10, 10)));
        editor.handle_pointer(drag_to((20, 20)));
        editor.handle_pointer(PointerInput {
            cell: (20, 20),
            secondary_pressed: true,
            secondary_down: true,
            ..Default::default()
        });

        assert!(editor.room_preview().is_none());
        // The release that follows must not carve anything.
        editor.handle_pointer(release_at((20, 20)));
        assert!(editor.rooms().is_empty());
        assert_eq!(editor.document().grid.count_floor(), 0);
    }

    #[test]
    fn test_spawn_room_sets_spawn_position() {
        let mut editor = Editor::new();
        editor.set_current_tool(Tool::Room);
        editor.set_room_kind(SPAWN_ROOM_KIND);

        editor.handle_pointer(press_at((10, 10)));
        editor.handle_pointer(drag_to((14, 14)));
        editor.handle_pointer(release_at((14, 14)));

        let room = &editor.rooms()[0];
        assert!(room.is_spawn_room);
        assert_eq!(
            editor.document().spawn_position,
            Some(crate::map::GridPos { x: 12, z: 12 })
        );

        // A second spawn room takes the flag over.
        editor.handle_pointer(press_at((30, 30)));
        editor.handle_pointer(drag_to((34, 34)));
        editor.handle_pointer(release_at((34, 34)));
        assert!(!editor.rooms()[0].is_spawn_room);
        assert!(editor.rooms()[1].is_spawn_room);
    }

    #[test]
    fn test_delete_room_keeps_tiles() {
        let mut editor = Editor::new();
        editor.set_current_tool(Tool::Room);
        editor.handle_pointer(press_at((10, 10)));
        editor.handle_pointer(drag_to((13, 13)));
        editor.handle_pointer(release_at((13, 13)));

        editor.delete_room(0);
        assert!(editor.rooms().is_empty());
        assert_eq!(editor.document().grid.count_floor(), 16);
    }

    #[test]
    fn test_new_document_resets_session() {
        let mut editor = Editor::new();
        editor.set_brush_size(1);
        editor.handle_pointer(press_at((5, 5)));
        editor.handle_pointer(release_at((5, 5)));
        assert!(editor.has_unsaved_changes());
        let revision = editor.map_revision();

        editor.new_document();
        assert!(!editor.has_unsaved_changes());
        assert_eq!(editor.undo_len(), 0);
        assert_eq!(editor.document().grid.count_floor(), 0);
        assert!(editor.map_revision() > revision);
    }
}
