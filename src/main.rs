//! # dungeon_ed Main Entry Point
//!
//! Initializes logging and starts the editor window via eframe/egui.
//!
//! ## License
//! Licensed under the MIT License.

use std::error::Error;

use eframe::egui;
use log::info;

use dungeon_ed::ui::MainWindow;

struct DungeonEdApp {
    window: MainWindow,
}

impl Default for DungeonEdApp {
    fn default() -> Self {
        Self {
            window: MainWindow::new(),
        }
    }
}

impl eframe::App for DungeonEdApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.window.update(ctx, frame);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("dungeon_ed starting...");

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(1280.0, 800.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Dungeon Editor",
        native_options,
        Box::new(|_cc| Box::new(DungeonEdApp::default())),
    );
    // run_native returns () so we simply return Ok.
    info!("dungeon_ed exiting.");
    Ok(())
}
