//! PNG fixture helpers for unit tests

use std::fs;
use std::io;
use std::path::Path;

use crate::image::ON_VALUE;

/// Edge length of a full room image in pixels.
pub const ROOM_PIXELS: u32 = 128;

/// Encode raw (already packed) image data as a PNG.
pub fn encode_png(
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    data: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if color == png::ColorType::Indexed {
            encoder.set_palette(vec![255, 255, 255, 0, 0, 0, 40, 40, 40, 200, 0, 0]);
        }
        let mut writer = encoder.write_header().expect("should write png header");
        writer.write_image_data(data).expect("should write png data");
    }
    out
}

/// Write a 128x128 indexed room image with the given pixels switched on.
pub fn write_room_png(path: &Path, on: &[(u32, u32)]) -> io::Result<()> {
    let mut pixels = vec![1u8; (ROOM_PIXELS * ROOM_PIXELS) as usize];
    for &(x, y) in on {
        pixels[(y * ROOM_PIXELS + x) as usize] = ON_VALUE;
    }
    let data = encode_png(
        ROOM_PIXELS,
        ROOM_PIXELS,
        png::ColorType::Indexed,
        png::BitDepth::Eight,
        &pixels,
    );
    fs::write(path, data)
}
