// src/ui/status_bar.rs

use std::sync::Arc;

use eframe::egui::{self, Color32, Context};
use parking_lot::RwLock;

use crate::editor::Editor;

pub struct StatusBar {
    editor: Arc<RwLock<Editor>>,
}

impl StatusBar {
    pub fn new(editor: Arc<RwLock<Editor>>) -> Self {
        Self { editor }
    }

    /// Draws the bottom status bar. The hovered cell and zoom level come
    /// from the canvas, which owns the view transform.
    pub fn update(&mut self, ctx: &Context, hovered_cell: Option<(i32, i32)>, zoom: f32) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let editor = self.editor.read(); // Keep the read lock short.

            ui.horizontal(|ui| {
                if let Some(error) = &editor.error_message {
                    ui.colored_label(Color32::LIGHT_RED, error);
                } else {
                    let dirty_marker = if editor.has_unsaved_changes() { "*" } else { "" };
                    ui.label(format!("{}{}", editor.status_message, dirty_marker));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Tool: {}", editor.current_tool().name()));
                    ui.separator();
                    ui.label(format!("{:.1} px/cell", zoom));
                    ui.separator();
                    if let Some((x, z)) = hovered_cell {
                        ui.label(format!("({}, {})", x, z));
                    }
                });
            });
        });
    }
}
