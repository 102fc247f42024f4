// src/document/codec.rs
//
// Tile payload codec. The on-disk payload is the grid's cells in x-major
// order, run-length encoded, gzip-compressed, then base64-encoded. The
// RLE form is `value` for a lone cell or `value, 0xFF, count` for a run
// (count 2..=255; longer runs are split). Cell values are 0 (void) and
// 1 (floor), so the 0xFF escape can never collide with a value byte.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

use crate::map::{CellState, TileGrid};

const RUN_ESCAPE: u8 = 0xFF;
const MAX_RUN: usize = 255;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid gzip stream: {0}")]
    Gzip(#[from] std::io::Error),
}

fn cell_byte(cell: CellState) -> u8 {
    match cell {
        CellState::Void => 0,
        CellState::Floor => 1,
    }
}

fn byte_cell(byte: u8) -> CellState {
    if byte == 0 {
        CellState::Void
    } else {
        CellState::Floor
    }
}

/// Encodes a grid into its compact string payload.
pub fn encode(grid: &TileGrid) -> String {
    let mut rle: Vec<u8> = Vec::new();
    let mut run: Option<(u8, usize)> = None;

    let mut flush = |rle: &mut Vec<u8>, value: u8, count: usize| {
        let mut remaining = count;
        while remaining > 0 {
            let chunk = remaining.min(MAX_RUN);
            rle.push(value);
            if chunk > 1 {
                rle.push(RUN_ESCAPE);
                rle.push(chunk as u8);
            }
            remaining -= chunk;
        }
    };

    for (_, _, cell) in grid.iter_cells() {
        let value = cell_byte(cell);
        match run {
            Some((v, count)) if v == value => run = Some((v, count + 1)),
            Some((v, count)) => {
                flush(&mut rle, v, count);
                run = Some((value, 1));
            }
            None => run = Some((value, 1)),
        }
    }
    if let Some((v, count)) = run {
        flush(&mut rle, v, count);
    }

    // Gzip never fails writing to a Vec.
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&rle).expect("gzip write to Vec");
    let compressed = encoder.finish().expect("gzip finish to Vec");

    BASE64.encode(compressed)
}

/// Decodes a payload produced by [`encode`] into a `width` x `depth`
/// grid. Trailing bytes beyond the grid are ignored and a truncated
/// stream leaves the remaining cells void, so a payload saved for a
/// different size still loads into something usable.
pub fn decode(payload: &str, width: i32, depth: i32) -> Result<TileGrid, CodecError> {
    let compressed = BASE64.decode(payload.trim())?;
    let mut rle = Vec::new();
    GzDecoder::new(compressed.as_slice()).read_to_end(&mut rle)?;

    let mut grid = TileGrid::new(width, depth);
    let mut x = 0i32;
    let mut z = 0i32;
    let mut i = 0usize;
    while i < rle.len() && x < width {
        let value = rle[i];
        i += 1;
        let mut count = 1usize;
        if i < rle.len() && rle[i] == RUN_ESCAPE {
            i += 1;
            if i < rle.len() {
                count = rle[i] as usize;
                i += 1;
            }
        }
        for _ in 0..count {
            if x >= width {
                break;
            }
            grid.set(x, z, byte_cell(value));
            z += 1;
            if z >= depth {
                z = 0;
                x += 1;
            }
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::CellState::Floor;

    fn round_trip(grid: &TileGrid) -> TileGrid {
        decode(&encode(grid), grid.width(), grid.depth()).unwrap()
    }

    #[test]
    fn test_empty_grid_round_trips() {
        let grid = TileGrid::new(16, 16);
        assert_eq!(round_trip(&grid), grid);
    }

    #[test]
    fn test_checkerboard_round_trips() {
        let mut grid = TileGrid::new(33, 17);
        for x in 0..33 {
            for z in 0..17 {
                if (x + z) % 2 == 0 {
                    grid.set(x, z, Floor);
                }
            }
        }
        assert_eq!(round_trip(&grid), grid);
    }

    #[test]
    fn test_long_runs_split_past_255() {
        // 200x200 all floor: a single 40000-cell run, far past one
        // escape's count range.
        let mut grid = TileGrid::new(200, 200);
        for x in 0..200 {
            for z in 0..200 {
                grid.set(x, z, Floor);
            }
        }
        let decoded = round_trip(&grid);
        assert_eq!(decoded, grid);
        assert_eq!(decoded.count_floor(), 40_000);
    }

    #[test]
    fn test_sparse_pattern_round_trips() {
        let mut grid = TileGrid::new(100, 100);
        for i in 0..100 {
            grid.set(i, (i * 7) % 100, Floor);
        }
        assert_eq!(round_trip(&grid), grid);
    }

    #[test]
    fn test_decode_into_larger_grid_leaves_rest_void() {
        let mut small = TileGrid::new(4, 4);
        small.set(0, 0, Floor);
        small.set(3, 3, Floor);
        let payload = encode(&small);

        // The stream runs out early; the tail of the big grid stays void.
        let big = decode(&payload, 10, 10).unwrap();
        assert_eq!(big.get(0, 0), Floor);
        assert_eq!(big.count_floor(), 2);
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(decode("!!! not base64 !!!", 4, 4).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_gzip() {
        let payload = BASE64.encode(b"plainly not gzip");
        assert!(decode(&payload, 4, 4).is_err());
    }
}
