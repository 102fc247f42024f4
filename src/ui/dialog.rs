// src/ui/dialog.rs

use eframe::egui::{self, Context};

/// What the user picked in the unsaved-changes dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Save,
    Discard,
    Cancel,
}

/// Owns the modal confirmation shown before an action would discard
/// unsaved edits. Only one dialog can be active at a time.
#[derive(Default)]
pub struct DialogManager {
    unsaved_changes_open: bool,
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_unsaved_changes(&mut self) {
        self.unsaved_changes_open = true;
    }

    /// Renders the active dialog, if any. Returns the user's choice once
    /// they pick one and closes the dialog.
    pub fn update(&mut self, ctx: &Context) -> Option<DialogResult> {
        if !self.unsaved_changes_open {
            return None;
        }

        let mut result = None;
        egui::Window::new("Unsaved Changes")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("The current map has unsaved changes. Save them first?");
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        result = Some(DialogResult::Save);
                    }
                    if ui.button("Don't Save").clicked() {
                        result = Some(DialogResult::Discard);
                    }
                    if ui.button("Cancel").clicked() {
                        result = Some(DialogResult::Cancel);
                    }
                });
            });

        if result.is_some() {
            self.unsaved_changes_open = false;
        }
        result
    }
}
