// src/document/document.rs

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::document::codec::{self, CodecError};
use crate::map::{GridPos, Room, TileGrid};

/// Grid size used for a freshly created map.
pub const DEFAULT_MAP_SIZE: i32 = 100;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed map document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tile payload error: {0}")]
    Codec(#[from] CodecError),
    #[error("map dimensions {0}x{1} are not usable")]
    BadDimensions(i32, i32),
}

/// On-disk shape of a map document. Key names are part of the map file
/// format, so external tooling keeps reading saved files.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapFile {
    width: i32,
    depth: i32,
    tile_data: String,
    #[serde(default)]
    rooms: Vec<Room>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spawn_position: Option<GridPos>,
    /// Everything this editor does not edit (enemies, props, ...) rides
    /// along untouched between load and save.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// The map being edited: tile grid, room records and spawn point, plus
/// a passthrough of foreign fields. Exclusively owned by one editor
/// session and replaced wholesale on load.
pub struct MapDocument {
    pub grid: TileGrid,
    pub rooms: Vec<Room>,
    pub spawn_position: Option<GridPos>,
    extra: Map<String, Value>,
}

impl MapDocument {
    /// Creates an empty document of the given size.
    pub fn new(width: i32, depth: i32) -> Self {
        Self {
            grid: TileGrid::new(width, depth),
            rooms: Vec::new(),
            spawn_position: None,
            extra: Map::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn depth(&self) -> i32 {
        self.grid.depth()
    }

    /// Loads a document from a JSON map file, decoding the tile payload.
    pub fn load_from_path(path: &Path) -> Result<Self, DocumentError> {
        let reader = BufReader::new(File::open(path)?);
        let file: MapFile = serde_json::from_reader(reader)?;
        if file.width <= 0 || file.depth <= 0 {
            return Err(DocumentError::BadDimensions(file.width, file.depth));
        }
        let grid = codec::decode(&file.tile_data, file.width, file.depth)?;
        Ok(Self {
            grid,
            rooms: file.rooms,
            spawn_position: file.spawn_position,
            extra: file.extra,
        })
    }

    /// Saves the document as JSON, encoding the tile payload.
    pub fn save_to_path(&self, path: &Path) -> Result<(), DocumentError> {
        let file = MapFile {
            width: self.grid.width(),
            depth: self.grid.depth(),
            tile_data: codec::encode(&self.grid),
            rooms: self.rooms.clone(),
            spawn_position: self.spawn_position,
            extra: self.extra.clone(),
        };
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &file)?;
        Ok(())
    }
}
