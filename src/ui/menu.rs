// src/ui/menu.rs

use std::sync::Arc;

use eframe::egui::{self, Context};
use parking_lot::RwLock;

use crate::editor::Editor;

/// Menu entries the menu bar cannot act on by itself: they either need
/// the unsaved-changes check or control the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIntent {
    NewMap,
    OpenMap,
    Exit,
}

pub struct MenuBar {
    editor: Arc<RwLock<Editor>>,
}

impl MenuBar {
    pub fn new(editor: Arc<RwLock<Editor>>) -> Self {
        Self { editor }
    }

    /// Draws the menu bar. Entries that replace or discard the current
    /// document are returned as intents for the main window to confirm.
    pub fn update(&mut self, ctx: &Context) -> Option<MenuIntent> {
        let mut intent = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New").clicked() {
                        intent = Some(MenuIntent::NewMap);
                        ui.close_menu();
                    }
                    if ui.button("Open...").clicked() {
                        intent = Some(MenuIntent::OpenMap);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Save").clicked() {
                        self.editor.write().save_document_wrapper();
                        ui.close_menu();
                    }
                    if ui.button("Save As...").clicked() {
                        self.editor.write().show_save_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        intent = Some(MenuIntent::Exit);
                        ui.close_menu();
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let (undo_len, redo_len) = {
                        let editor = self.editor.read();
                        (editor.undo_len(), editor.redo_len())
                    };
                    if ui
                        .add_enabled(undo_len > 0, egui::Button::new("Undo"))
                        .clicked()
                    {
                        self.editor.write().undo();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(redo_len > 0, egui::Button::new("Redo"))
                        .clicked()
                    {
                        self.editor.write().redo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    let mut editor = self.editor.write();
                    if ui
                        .checkbox(&mut editor.show_side_panel, "Tools Panel")
                        .clicked()
                    {
                        ui.close_menu();
                    }
                });
            });
        });

        intent
    }
}
