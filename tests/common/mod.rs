//! Shared helpers for integration tests: PNG room fixtures and the binary path

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Edge length of a room image in pixels.
pub const ROOM_PIXELS: u32 = 128;

/// Palette index drawn for "on" pixels.
pub const ON: u8 = 2;

/// Get the path to the bitsyroom binary
pub fn bitsyroom_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bitsyroom"))
}

/// Write a 128x128 indexed room image with the given pixels switched on.
pub fn write_room(path: &Path, on: &[(u32, u32)]) {
    let mut pixels = vec![0u8; (ROOM_PIXELS * ROOM_PIXELS) as usize];
    for &(x, y) in on {
        pixels[(y * ROOM_PIXELS + x) as usize] = ON;
    }

    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, ROOM_PIXELS, ROOM_PIXELS);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(vec![0, 0, 0, 90, 90, 90, 255, 255, 255]);
        let mut writer = encoder.write_header().expect("should write png header");
        writer.write_image_data(&pixels).expect("should write png data");
    }
    fs::write(path, data).expect("should write room image");
}

/// All pixels of the 8x8 block at tile `(tx, ty)` whose index in the block is
/// below `count`, in row-major order.
pub fn block_pixels(tx: u32, ty: u32, count: u32) -> Vec<(u32, u32)> {
    (0..count).map(|i| (tx * 8 + i % 8, ty * 8 + i / 8)).collect()
}
