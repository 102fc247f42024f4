// src/ui/side_panel.rs

use std::sync::Arc;

use eframe::egui::{self, Context, Ui};
use parking_lot::RwLock;

use crate::editor::{Editor, EditorAction, Tool, BRUSH_SIZES, ROOM_KINDS};

/// What the rooms list asked for this frame.
enum RoomListAction {
    Delete(usize),
    Clear,
}

/// The left-side panel: tool buttons, brush and room options, the room
/// list and map statistics.
pub struct SidePanel {
    editor: Arc<RwLock<Editor>>,
}

impl SidePanel {
    pub fn new(editor: Arc<RwLock<Editor>>) -> Self {
        Self { editor }
    }

    pub fn update(&mut self, ctx: &Context) {
        if !self.editor.read().show_side_panel {
            return;
        }

        egui::SidePanel::left("tools_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.show_tools(ui);
                ui.separator();
                self.show_brush_options(ui);
                self.show_room_options(ui);
                ui.separator();
                self.show_rooms(ui);
                ui.separator();
                self.show_summary(ui);
            });
    }

    fn show_tools(&self, ui: &mut Ui) {
        ui.heading("Tools");

        let mut clicked = None;
        {
            let editor = self.editor.read();
            for &tool in Tool::all() {
                let selected = editor.current_tool() == tool;
                let label = format!("{} ({})", tool.name(), tool.shortcut());
                if ui.selectable_label(selected, label).clicked() {
                    clicked = Some(tool);
                }
            }
        }
        if let Some(tool) = clicked {
            self.editor.write().apply_action(EditorAction::SelectTool(tool));
        }
    }

    /// Brush size picker, shown only while a paint tool is active.
    fn show_brush_options(&self, ui: &mut Ui) {
        let (tool, current) = {
            let editor = self.editor.read();
            (editor.current_tool(), editor.brush_size())
        };
        if tool != Tool::Floor && tool != Tool::Erase {
            return;
        }

        ui.heading("Brush");
        let mut clicked = None;
        ui.horizontal(|ui| {
            for &size in BRUSH_SIZES.iter() {
                if ui.selectable_label(current == size, size.to_string()).clicked() {
                    clicked = Some(size);
                }
            }
        });
        if let Some(size) = clicked {
            self.editor
                .write()
                .apply_action(EditorAction::SelectBrushSize(size));
        }
        ui.separator();
    }

    /// Room type picker, shown only while the room tool is active.
    fn show_room_options(&self, ui: &mut Ui) {
        if self.editor.read().current_tool() != Tool::Room {
            return;
        }

        ui.heading("Room");
        let current = self.editor.read().room_kind().to_string();
        let mut selected = current.clone();
        egui::ComboBox::from_label("Type")
            .selected_text(&selected)
            .show_ui(ui, |ui| {
                for &kind in ROOM_KINDS.iter() {
                    ui.selectable_value(&mut selected, kind.to_string(), kind);
                }
            });
        if selected != current {
            self.editor.write().set_room_kind(selected);
        }
        ui.separator();
    }

    fn show_rooms(&self, ui: &mut Ui) {
        ui.heading("Rooms");

        let mut action = None;
        {
            let editor = self.editor.read();
            if editor.rooms().is_empty() {
                ui.label("No rooms carved yet.");
            } else {
                for (index, room) in editor.rooms().iter().enumerate() {
                    ui.horizontal(|ui| {
                        let spawn_tag = if room.is_spawn_room { " [spawn]" } else { "" };
                        ui.label(format!(
                            "{} {}x{} at ({}, {}){}",
                            room.kind,
                            room.size.width,
                            room.size.depth,
                            room.position.x,
                            room.position.z,
                            spawn_tag,
                        ));
                        if ui.small_button("x").clicked() {
                            action = Some(RoomListAction::Delete(index));
                        }
                    });
                }
                if ui.button("Clear All").clicked() {
                    action = Some(RoomListAction::Clear);
                }
            }
        }
        match action {
            Some(RoomListAction::Delete(index)) => self.editor.write().delete_room(index),
            Some(RoomListAction::Clear) => self.editor.write().clear_rooms(),
            None => {}
        }
    }

    fn show_summary(&self, ui: &mut Ui) {
        ui.heading("Map");

        let editor = self.editor.read();
        let summary = editor.summary();
        ui.label(format!(
            "{}x{} cells",
            editor.document().width(),
            editor.document().depth()
        ));
        ui.label(format!("Floor cells: {}", summary.floor_cells));
        ui.label(format!("Rooms: {}", summary.room_count));
        ui.label(format!(
            "Undo: {}  Redo: {}",
            editor.undo_len(),
            editor.redo_len()
        ));
    }
}
