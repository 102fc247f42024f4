// src/editor/view.rs
//
// Affine mapping between screen pixels and grid cells: pan offset plus a
// uniform pixels-per-cell scale. The canvas reads cell rects from here
// and never does its own coordinate math.

use eframe::egui::{Pos2, Rect, Vec2};

/// Zoom bounds in pixels per cell.
pub const MIN_SCALE: f32 = 1.0;
pub const MAX_SCALE: f32 = 20.0;

/// Extra cells included on every side of the visible range so panning
/// never exposes an unpainted seam.
const VISIBLE_MARGIN: i32 = 2;

/// Inclusive rectangle of grid cells, as returned by
/// [`ViewTransform::visible_cell_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub min_x: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_z: i32,
}

impl CellRange {
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_z > self.max_z
    }
}

/// Screen/grid transform under continuous zoom and pixel pan.
#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    pan: Vec2,
    scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            scale: 8.0,
        }
    }
}

impl ViewTransform {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan
    }

    /// Maps a screen position to the grid cell under it.
    pub fn screen_to_cell(&self, screen: Pos2) -> (i32, i32) {
        let x = ((screen.x - self.pan.x) / self.scale).floor() as i32;
        let z = ((screen.y - self.pan.y) / self.scale).floor() as i32;
        (x, z)
    }

    /// Maps a cell corner to its screen position (inverse of
    /// [`Self::screen_to_cell`] up to the cell's pixel extent).
    pub fn cell_to_screen(&self, x: i32, z: i32) -> Pos2 {
        Pos2::new(
            x as f32 * self.scale + self.pan.x,
            z as f32 * self.scale + self.pan.y,
        )
    }

    /// The screen rectangle covered by one cell.
    pub fn cell_rect(&self, x: i32, z: i32) -> Rect {
        let min = self.cell_to_screen(x, z);
        Rect::from_min_size(min, Vec2::splat(self.scale))
    }

    /// Shifts the view by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Zooms by `factor`, keeping the cell under `screen` stationary.
    /// The resulting scale is clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn zoom_at(&mut self, screen: Pos2, factor: f32) {
        let old_scale = self.scale;
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = self.scale / old_scale;
        self.pan = screen.to_vec2() - (screen.to_vec2() - self.pan) * ratio;
    }

    /// The inclusive range of cells a renderer must draw for `viewport`,
    /// padded by a small margin and clamped to the grid.
    pub fn visible_cell_range(&self, viewport: Rect, grid_width: i32, grid_depth: i32) -> CellRange {
        let (min_x, min_z) = self.screen_to_cell(viewport.min);
        let (max_x, max_z) = self.screen_to_cell(viewport.max);
        CellRange {
            min_x: (min_x - VISIBLE_MARGIN).max(0),
            min_z: (min_z - VISIBLE_MARGIN).max(0),
            max_x: (max_x + VISIBLE_MARGIN).min(grid_width - 1),
            max_z: (max_z + VISIBLE_MARGIN).min(grid_depth - 1),
        }
    }

    /// Recomputes the transform so the whole grid is centered in
    /// `viewport`, with the scale chosen to fit (within zoom bounds).
    /// Called whenever a map is created or loaded.
    pub fn center_on_grid(&mut self, viewport: Rect, grid_width: i32, grid_depth: i32) {
        let fit = if grid_width > 0 && grid_depth > 0 {
            (viewport.width() / grid_width as f32).min(viewport.height() / grid_depth as f32)
        } else {
            MIN_SCALE
        };
        self.scale = fit.clamp(MIN_SCALE, MAX_SCALE);
        let grid_size = Vec2::new(
            grid_width as f32 * self.scale,
            grid_depth as f32 * self.scale,
        );
        self.pan = viewport.min.to_vec2() + (viewport.size() - grid_size) * 0.5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_screen_cell_round_trip() {
        let mut view = ViewTransform::default();
        view.pan(Vec2::new(13.0, -7.0));
        let corner = view.cell_to_screen(5, 9);
        // The corner pixel belongs to that same cell.
        assert_eq!(view.screen_to_cell(corner + Vec2::splat(0.5)), (5, 9));
    }

    #[test]
    fn test_screen_to_cell_floors_negative() {
        let view = ViewTransform::default(); // scale 8, no pan
        assert_eq!(view.screen_to_cell(Pos2::new(-0.5, -0.5)), (-1, -1));
        assert_eq!(view.screen_to_cell(Pos2::new(7.9, 7.9)), (0, 0));
        assert_eq!(view.screen_to_cell(Pos2::new(8.0, 8.0)), (1, 1));
    }

    #[test]
    fn test_zoom_anchors_cursor_cell() {
        let mut view = ViewTransform::default();
        view.pan(Vec2::new(3.0, 7.0));
        let cursor = Pos2::new(123.4, 88.8);

        let before = view.screen_to_cell(cursor);
        view.zoom_at(cursor, 1.5);
        assert_eq!(view.screen_to_cell(cursor), before);

        view.zoom_at(cursor, 0.4);
        assert_eq!(view.screen_to_cell(cursor), before);
    }

    #[test]
    fn test_zoom_clamps_scale() {
        let mut view = ViewTransform::default();
        let cursor = Pos2::new(50.0, 50.0);
        view.zoom_at(cursor, 1000.0);
        assert_approx_eq!(view.scale(), MAX_SCALE);
        // Clamped zooms still keep the anchor cell stable.
        let before = view.screen_to_cell(cursor);
        view.zoom_at(cursor, 1e-6);
        assert_approx_eq!(view.scale(), MIN_SCALE);
        assert_eq!(view.screen_to_cell(cursor), before);
    }

    #[test]
    fn test_visible_cell_range_has_margin_and_clamps() {
        let mut view = ViewTransform::default(); // scale 8
        view.pan(Vec2::new(-80.0, -80.0)); // viewport starts at cell (10, 10)
        let viewport = Rect::from_min_size(Pos2::ZERO, Vec2::new(160.0, 80.0));

        let range = view.visible_cell_range(viewport, 200, 200);
        assert_eq!(range.min_x, 8); // 10 - margin
        assert_eq!(range.min_z, 8);
        assert_eq!(range.max_x, 32); // 30 + margin
        assert_eq!(range.max_z, 22);

        // A small grid clamps the range to its own bounds.
        let clamped = view.visible_cell_range(viewport, 12, 12);
        assert_eq!(clamped.max_x, 11);
        assert_eq!(clamped.max_z, 11);
        assert!(!clamped.is_empty());
    }

    #[test]
    fn test_center_on_grid_fits_and_centers() {
        let mut view = ViewTransform::default();
        let viewport = Rect::from_min_size(Pos2::new(100.0, 0.0), Vec2::new(800.0, 600.0));
        view.center_on_grid(viewport, 100, 100);

        // 600 / 100 = 6 px per cell.
        assert_approx_eq!(view.scale(), 6.0);
        let top_left = view.cell_to_screen(0, 0);
        let bottom_right = view.cell_to_screen(100, 100);
        // Centered horizontally and vertically inside the viewport.
        assert_approx_eq!(top_left.x - viewport.min.x, viewport.max.x - bottom_right.x, 0.01);
        assert_approx_eq!(top_left.y - viewport.min.y, viewport.max.y - bottom_right.y, 0.01);
    }
}
