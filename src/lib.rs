//! # dungeon_ed
//!
//! A tile-grid dungeon map editor. Maps are rectangular grids of
//! floor/void cells painted with brushes or carved as rectangular rooms,
//! with full undo/redo, and saved as JSON documents whose tile payload
//! is run-length encoded, gzipped and base64 wrapped.
//!
//! The crate splits into:
//! - [`map`]: the tile grid and room records.
//! - [`document`]: the on-disk map document and its tile codec.
//! - [`editor`]: the editing session, tools and edit history.
//! - [`ui`]: the eframe/egui shell.

pub mod document;
pub mod editor;
pub mod map;
pub mod ui;
