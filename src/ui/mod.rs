// src/ui/mod.rs
pub mod central_panel;
pub mod dialog;
pub mod main_window;
pub mod menu;
pub mod side_panel;
pub mod status_bar;

pub use central_panel::GridCanvas;
pub use dialog::{DialogManager, DialogResult};
pub use main_window::MainWindow;
