//! Central canvas module: draws the tile grid, rooms and previews, and
//! handles pan/zoom plus pointer forwarding to the editor's tools.

use std::sync::Arc;

use eframe::egui::{self, Color32, Context, Painter, Rect, Sense, Stroke, Vec2};
use parking_lot::RwLock;

use crate::editor::{Editor, PointerInput, Tool, ViewTransform};
use crate::map::CellState;

const FLOOR_COLOR: Color32 = Color32::from_rgb(186, 168, 130);
const GRID_LINE_COLOR: Color32 = Color32::from_gray(48);
const MAP_BORDER_COLOR: Color32 = Color32::from_gray(110);
const ROOM_COLOR: Color32 = Color32::from_rgb(220, 190, 60);
const SPAWN_ROOM_COLOR: Color32 = Color32::from_rgb(90, 200, 120);
const PREVIEW_COLOR: Color32 = Color32::from_rgb(240, 240, 240);

/// The main viewport: owns the view transform and translates raw egui
/// pointer state into the editor's per-frame [`PointerInput`].
pub struct GridCanvas {
    editor: Arc<RwLock<Editor>>,
    view: ViewTransform,

    /// Cell currently under the pointer, for the status bar.
    pub hovered_cell: Option<(i32, i32)>,

    // Edge detection for press/release; egui only reports "down".
    prev_primary_down: bool,
    prev_secondary_down: bool,
    last_cell: (i32, i32),

    // Map revision last centered on; forces a recenter on first frame.
    seen_revision: Option<u64>,
}

impl GridCanvas {
    pub fn new(editor: Arc<RwLock<Editor>>) -> Self {
        Self {
            editor,
            view: ViewTransform::default(),
            hovered_cell: None,
            prev_primary_down: false,
            prev_secondary_down: false,
            last_cell: (0, 0),
            seen_revision: None,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.view.scale()
    }

    /// Called each frame to update the canvas.
    pub fn update(&mut self, ctx: &Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();

                self.recenter_if_map_changed(rect);

                // --- Pan & Zoom Handling ---
                let response = ui.interact(rect, ui.id(), Sense::drag());
                let pan_tool = self.editor.read().current_tool() == Tool::Pan;
                if response.dragged_by(egui::PointerButton::Middle)
                    || (pan_tool && response.dragged_by(egui::PointerButton::Primary))
                {
                    self.view.pan(response.drag_delta());
                    ctx.request_repaint();
                }
                self.handle_zoom(ui, rect);

                // --- Pointer Forwarding ---
                self.forward_pointer(ui, rect, pan_tool);

                // --- Drawing ---
                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, Color32::BLACK);
                {
                    let editor = self.editor.read();
                    self.draw_map(&painter, rect, &editor);
                    self.draw_rooms(&painter, &editor);
                    self.draw_previews(&painter, &editor);
                }

                // --- Redraw Requests from the Editor ---
                if self.editor.write().take_redraw_request() {
                    ctx.request_repaint();
                }
            });
    }

    fn recenter_if_map_changed(&mut self, rect: Rect) {
        let (revision, width, depth) = {
            let editor = self.editor.read();
            let doc = editor.document();
            (editor.map_revision(), doc.width(), doc.depth())
        };
        if self.seen_revision != Some(revision) {
            self.view.center_on_grid(rect, width, depth);
            self.seen_revision = Some(revision);
        }
    }

    fn handle_zoom(&mut self, ui: &egui::Ui, rect: Rect) {
        let scroll = ui.input().scroll_delta.y;
        if scroll.abs() > 0.0 {
            // Bind before the branch so the input lock is released first.
            let hover = ui.input().pointer.hover_pos();
            if let Some(pointer) = hover {
                if rect.contains(pointer) {
                    let zoom_sensitivity = 0.002;
                    let factor = 1.0 + scroll * zoom_sensitivity;
                    self.view.zoom_at(pointer, factor);
                    ui.ctx().request_repaint();
                }
            }
        }
    }

    /// Builds this frame's pointer sample and hands it to the editor.
    /// Press edges only fire over the canvas; release edges always fire
    /// so a stroke that leaves the panel still commits.
    fn forward_pointer(&mut self, ui: &egui::Ui, rect: Rect, pan_tool: bool) {
        let primary_down = ui.input().pointer.button_down(egui::PointerButton::Primary);
        let secondary_down = ui.input().pointer.button_down(egui::PointerButton::Secondary);
        let hover = ui.input().pointer.hover_pos();

        let over_canvas = hover.map_or(false, |p| rect.contains(p));
        if let Some(pos) = hover {
            if over_canvas {
                self.last_cell = self.view.screen_to_cell(pos);
            }
        }
        self.hovered_cell = if over_canvas { Some(self.last_cell) } else { None };

        let input = PointerInput {
            cell: self.last_cell,
            primary_pressed: primary_down && !self.prev_primary_down && over_canvas,
            primary_down,
            primary_released: !primary_down && self.prev_primary_down,
            secondary_pressed: secondary_down && !self.prev_secondary_down && over_canvas,
            secondary_down,
            secondary_released: !secondary_down && self.prev_secondary_down,
        };
        self.prev_primary_down = primary_down;
        self.prev_secondary_down = secondary_down;

        // Panning never paints.
        if pan_tool {
            return;
        }
        let relevant = input.primary_pressed
            || input.primary_down
            || input.primary_released
            || input.secondary_pressed
            || input.secondary_down
            || input.secondary_released;
        if relevant {
            self.editor.write().handle_pointer(input);
        }
    }

    // ============================================================
    // Drawing
    // ============================================================

    fn draw_map(&self, painter: &Painter, rect: Rect, editor: &Editor) {
        let grid = &editor.document().grid;
        let range = self.view.visible_cell_range(rect, grid.width(), grid.depth());
        if range.is_empty() {
            return;
        }

        for x in range.min_x..=range.max_x {
            for z in range.min_z..=range.max_z {
                if grid.get(x, z) == CellState::Floor {
                    painter.rect_filled(self.view.cell_rect(x, z), 0.0, FLOOR_COLOR);
                }
            }
        }

        // Cell grid lines get noisy when zoomed far out.
        if self.view.scale() >= 6.0 {
            let stroke = Stroke::new(1.0, GRID_LINE_COLOR);
            for x in range.min_x..=(range.max_x + 1) {
                let top = self.view.cell_to_screen(x, range.min_z);
                let bottom = self.view.cell_to_screen(x, range.max_z + 1);
                painter.line_segment([top, bottom], stroke);
            }
            for z in range.min_z..=(range.max_z + 1) {
                let left = self.view.cell_to_screen(range.min_x, z);
                let right = self.view.cell_to_screen(range.max_x + 1, z);
                painter.line_segment([left, right], stroke);
            }
        }

        // Map boundary.
        let border = Rect::from_min_max(
            self.view.cell_to_screen(0, 0),
            self.view.cell_to_screen(grid.width(), grid.depth()),
        );
        painter.rect_stroke(border, 0.0, Stroke::new(1.0, MAP_BORDER_COLOR));
    }

    fn draw_rooms(&self, painter: &Painter, editor: &Editor) {
        for room in editor.rooms() {
            let min = self.view.cell_to_screen(room.position.x, room.position.z);
            let max = self.view.cell_to_screen(
                room.position.x + room.size.width,
                room.position.z + room.size.depth,
            );
            let color = if room.is_spawn_room {
                SPAWN_ROOM_COLOR
            } else {
                ROOM_COLOR
            };
            painter.rect_stroke(Rect::from_min_max(min, max), 0.0, Stroke::new(2.0, color));

            if self.view.scale() >= 6.0 {
                painter.text(
                    min + Vec2::new(3.0, 1.0),
                    egui::Align2::LEFT_TOP,
                    &room.kind,
                    egui::FontId::monospace(11.0),
                    color,
                );
            }
        }

        if let Some(spawn) = editor.document().spawn_position {
            let center = self.view.cell_to_screen(spawn.x, spawn.z)
                + Vec2::splat(self.view.scale() * 0.5);
            painter.circle_filled(center, self.view.scale() * 0.35, Color32::LIGHT_BLUE);
        }
    }

    fn draw_previews(&self, painter: &Painter, editor: &Editor) {
        // Live rectangle while carving a room.
        if let Some((min, max)) = editor.room_preview() {
            let screen = Rect::from_min_max(
                self.view.cell_to_screen(min.x, min.z),
                self.view.cell_to_screen(max.x + 1, max.z + 1),
            );
            painter.rect_stroke(screen, 0.0, Stroke::new(1.0, PREVIEW_COLOR));
            return;
        }

        // Brush footprint under the cursor for the paint tools.
        let tool = editor.current_tool();
        if tool != Tool::Floor && tool != Tool::Erase {
            return;
        }
        if let Some((cx, cz)) = self.hovered_cell {
            let half = editor.brush_size() / 2;
            let screen = Rect::from_min_max(
                self.view.cell_to_screen(cx - half, cz - half),
                self.view.cell_to_screen(cx + half + 1, cz + half + 1),
            );
            painter.rect_stroke(screen, 0.0, Stroke::new(1.0, PREVIEW_COLOR));
        }
    }
}
