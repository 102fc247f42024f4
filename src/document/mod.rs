// src/document/mod.rs
pub mod codec;
mod document;

pub use document::{DocumentError, MapDocument, DEFAULT_MAP_SIZE};
