//! # Main Window Module
//!
//! Composes the full editor UI out of the panel modules:
//! - A top menu bar for document and history actions.
//! - A left side panel for tools, brush and room options.
//! - The central grid canvas.
//! - A bottom status bar.
//!
//! The window also translates keyboard shortcuts into editor actions and
//! runs the unsaved-changes confirmation before New or Open replace the
//! current document.

use std::sync::Arc;

use eframe::egui::{self, Context, Key};
use parking_lot::RwLock;

use crate::editor::{Editor, EditorAction, Tool, BRUSH_SIZES};
use crate::ui::central_panel::GridCanvas;
use crate::ui::dialog::{DialogManager, DialogResult};
use crate::ui::menu::{MenuBar, MenuIntent};
use crate::ui::side_panel::SidePanel;
use crate::ui::status_bar::StatusBar;

const SIZE_KEYS: [Key; 5] = [Key::Num1, Key::Num2, Key::Num3, Key::Num4, Key::Num5];

/// A document-replacing action waiting on the unsaved-changes dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    NewMap,
    OpenMap,
}

/// MainWindow holds the whole UI and the shared editor session.
pub struct MainWindow {
    editor: Arc<RwLock<Editor>>,
    menu: MenuBar,
    side_panel: SidePanel,
    status_bar: StatusBar,
    canvas: GridCanvas,
    dialogs: DialogManager,
    pending: Option<PendingAction>,
}

impl MainWindow {
    pub fn new() -> Self {
        let editor = Arc::new(RwLock::new(Editor::new()));
        Self {
            menu: MenuBar::new(Arc::clone(&editor)),
            side_panel: SidePanel::new(Arc::clone(&editor)),
            status_bar: StatusBar::new(Arc::clone(&editor)),
            canvas: GridCanvas::new(Arc::clone(&editor)),
            dialogs: DialogManager::new(),
            pending: None,
            editor,
        }
    }

    /// Draws the complete UI layout. Panel order matters: the central
    /// canvas must claim its space last.
    pub fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        match self.menu.update(ctx) {
            Some(MenuIntent::NewMap) => self.confirm_then(PendingAction::NewMap),
            Some(MenuIntent::OpenMap) => self.confirm_then(PendingAction::OpenMap),
            Some(MenuIntent::Exit) => frame.close(),
            None => {}
        }

        match self.dialogs.update(ctx) {
            Some(DialogResult::Save) => {
                self.editor.write().save_document_wrapper();
                self.run_pending();
            }
            Some(DialogResult::Discard) => self.run_pending(),
            Some(DialogResult::Cancel) => self.pending = None,
            None => {}
        }

        self.side_panel.update(ctx);
        self.status_bar
            .update(ctx, self.canvas.hovered_cell, self.canvas.zoom());
        self.canvas.update(ctx);
    }

    /// Runs `action` immediately, or parks it behind the unsaved-changes
    /// dialog when the document is dirty.
    fn confirm_then(&mut self, action: PendingAction) {
        self.pending = Some(action);
        if self.editor.read().has_unsaved_changes() {
            self.dialogs.show_unsaved_changes();
        } else {
            self.run_pending();
        }
    }

    fn run_pending(&mut self) {
        match self.pending.take() {
            Some(PendingAction::NewMap) => self.editor.write().new_document(),
            Some(PendingAction::OpenMap) => self.editor.write().show_open_dialog(),
            None => {}
        }
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        // A focused text widget owns the keyboard.
        if ctx.wants_keyboard_input() {
            return;
        }

        let mut actions = Vec::new();
        {
            let input = ctx.input();
            let command = input.modifiers.ctrl || input.modifiers.command;

            if command {
                if input.key_pressed(Key::Z) {
                    actions.push(EditorAction::Undo);
                }
                if input.key_pressed(Key::Y) {
                    actions.push(EditorAction::Redo);
                }
            } else {
                if input.key_pressed(Key::F) {
                    actions.push(EditorAction::SelectTool(Tool::Floor));
                }
                if input.key_pressed(Key::E) {
                    actions.push(EditorAction::SelectTool(Tool::Erase));
                }
                if input.key_pressed(Key::R) {
                    actions.push(EditorAction::SelectTool(Tool::Room));
                }
                if input.key_pressed(Key::P) {
                    actions.push(EditorAction::SelectTool(Tool::Pan));
                }
                for (key, &size) in SIZE_KEYS.iter().zip(BRUSH_SIZES.iter()) {
                    if input.key_pressed(*key) {
                        actions.push(EditorAction::SelectBrushSize(size));
                    }
                }
            }
        }

        if !actions.is_empty() {
            let mut editor = self.editor.write();
            for action in actions {
                editor.apply_action(action);
            }
        }
    }
}

impl Default for MainWindow {
    fn default() -> Self {
        Self::new()
    }
}
