//! Two-tone PNG decoding and tile slicing
//!
//! Room images are read with their raw sample values intact: the palette
//! index for indexed PNGs, the gray level for grayscale ones. A pixel is
//! "on" when its sample equals [`ON_VALUE`]; every other value is "off".

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{BitsyError, Result};

/// Raw sample value treated as an "on" pixel.
pub const ON_VALUE: u8 = 2;

/// Edge length of a tile in pixels.
pub const TILE_SIZE: u32 = 8;

/// A decoded two-tone room image.
#[derive(Debug, Clone)]
pub struct TwoToneImage {
    path: PathBuf,
    width: u32,
    height: u32,
    /// One unpacked sample per pixel, row-major
    samples: Vec<u8>,
}

impl TwoToneImage {
    /// Open and decode the PNG at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| BitsyError::file_access(path, e))?;
        log::debug!("opened frame image {}", path.display());
        Self::decode(BufReader::new(file), path)
    }

    /// Decode a PNG stream. `path` identifies the image in error messages.
    pub fn decode<R: Read>(reader: R, path: &Path) -> Result<Self> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::IDENTITY);

        let mut reader =
            decoder.read_info().map_err(|e| BitsyError::image_format(path, e.to_string()))?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info =
            reader.next_frame(&mut buf).map_err(|e| BitsyError::image_format(path, e.to_string()))?;

        match info.color_type {
            png::ColorType::Indexed | png::ColorType::Grayscale => {}
            other => {
                return Err(BitsyError::image_format(
                    path,
                    format!("expected an indexed or grayscale PNG, found {:?}", other),
                ));
            }
        }

        let depth = info.bit_depth as u8;
        if depth > 8 {
            return Err(BitsyError::image_format(
                path,
                format!("unsupported bit depth {}", depth),
            ));
        }

        let width = info.width as usize;
        let mut samples = Vec::with_capacity(width * info.height as usize);
        for row in buf.chunks(info.line_size).take(info.height as usize) {
            unpack_row(row, width, depth, &mut samples);
        }

        Ok(Self { path: path.to_path_buf(), width: info.width, height: info.height, samples })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the pixel at absolute coordinate `(x, y)` is on.
    ///
    /// Coordinates must be inside the image.
    pub fn is_on(&self, x: u32, y: u32) -> bool {
        self.samples[(y as usize) * (self.width as usize) + x as usize] == ON_VALUE
    }

    /// Pack the 8x8 block at tile coordinate `(tile_x, tile_y)` into a mask.
    ///
    /// Bit `row * 8 + col` is set iff the pixel at
    /// `(tile_x * 8 + col, tile_y * 8 + row)` is on.
    pub fn slice(&self, tile_x: u32, tile_y: u32) -> Result<u64> {
        let x0 = tile_x * TILE_SIZE;
        let y0 = tile_y * TILE_SIZE;
        if x0 + TILE_SIZE > self.width || y0 + TILE_SIZE > self.height {
            return Err(BitsyError::image_format(
                &self.path,
                format!(
                    "tile ({},{}) lies outside the {}x{} image",
                    tile_x, tile_y, self.width, self.height
                ),
            ));
        }

        let mut mask = 0u64;
        let mut bit = 0;
        for y in y0..y0 + TILE_SIZE {
            for x in x0..x0 + TILE_SIZE {
                if self.is_on(x, y) {
                    mask |= 1 << bit;
                }
                bit += 1;
            }
        }

        Ok(mask)
    }
}

/// Unpack one scanline of `depth`-bit samples (MSB first) into `out`.
fn unpack_row(row: &[u8], width: usize, depth: u8, out: &mut Vec<u8>) {
    if depth == 8 {
        out.extend_from_slice(&row[..width]);
        return;
    }

    let depth = depth as usize;
    let mask = (1u8 << depth) - 1;
    for x in 0..width {
        let bit = x * depth;
        let shift = 8 - depth - (bit % 8);
        out.push((row[bit / 8] >> shift) & mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{encode_png, write_room_png};
    use tempfile::TempDir;

    #[test]
    fn test_slice_single_pixel_at_origin() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("room.png");
        write_room_png(&path, &[(0, 0)]).expect("should write png");

        let img = TwoToneImage::open(&path).expect("should open png");
        assert_eq!((img.width(), img.height()), (128, 128));
        assert_eq!(img.slice(0, 0).expect("in bounds"), 1);
        assert_eq!(img.slice(1, 0).expect("in bounds"), 0);
    }

    #[test]
    fn test_slice_bit_order_is_row_major() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("room.png");
        // tile (2,3): col 5 row 1, and the last pixel
        write_room_png(&path, &[(16 + 5, 24 + 1), (16 + 7, 24 + 7)]).expect("should write png");

        let img = TwoToneImage::open(&path).expect("should open png");
        let mask = img.slice(2, 3).expect("in bounds");
        assert_eq!(mask, (1 << (8 + 5)) | (1 << 63));
    }

    #[test]
    fn test_only_on_value_counts() {
        // Indices 1 and 3 are off, only 2 is on
        let pixels: Vec<u8> = (0..64).map(|i| (i % 4) as u8).collect();
        let data = encode_png(8, 8, png::ColorType::Indexed, png::BitDepth::Eight, &pixels);
        let img = TwoToneImage::decode(data.as_slice(), Path::new("mem.png")).expect("decode");

        let mask = img.slice(0, 0).expect("in bounds");
        let expected = (0..64).filter(|i| i % 4 == 2).fold(0u64, |m, i| m | (1 << i));
        assert_eq!(mask, expected);
    }

    #[test]
    fn test_packed_two_bit_indexed() {
        // 8 pixels per row at 2 bits = 2 bytes; row 0 is [0,1,2,3,2,0,0,0]
        let mut packed = vec![0u8; 16];
        packed[0] = 0b00_01_10_11;
        packed[1] = 0b10_00_00_00;
        let data = encode_png(8, 8, png::ColorType::Indexed, png::BitDepth::Two, &packed);
        let img = TwoToneImage::decode(data.as_slice(), Path::new("mem.png")).expect("decode");

        assert_eq!(img.slice(0, 0).expect("in bounds"), (1 << 2) | (1 << 4));
    }

    #[test]
    fn test_grayscale_supported() {
        let mut pixels = vec![0u8; 64];
        pixels[9] = ON_VALUE;
        pixels[10] = 255;
        let data = encode_png(8, 8, png::ColorType::Grayscale, png::BitDepth::Eight, &pixels);
        let img = TwoToneImage::decode(data.as_slice(), Path::new("mem.png")).expect("decode");

        assert_eq!(img.slice(0, 0).expect("in bounds"), 1 << 9);
    }

    #[test]
    fn test_rgb_rejected() {
        let pixels = vec![0u8; 8 * 8 * 3];
        let data = encode_png(8, 8, png::ColorType::Rgb, png::BitDepth::Eight, &pixels);
        let err = TwoToneImage::decode(data.as_slice(), Path::new("color.png")).unwrap_err();
        assert!(matches!(err, BitsyError::ImageFormat { .. }));
        assert!(err.to_string().contains("color.png"));
    }

    #[test]
    fn test_not_a_png_rejected() {
        let err =
            TwoToneImage::decode(&b"definitely not a png"[..], Path::new("x.png")).unwrap_err();
        assert!(matches!(err, BitsyError::ImageFormat { .. }));
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let pixels = vec![0u8; 12 * 8];
        let data = encode_png(12, 8, png::ColorType::Indexed, png::BitDepth::Eight, &pixels);
        let img = TwoToneImage::decode(data.as_slice(), Path::new("small.png")).expect("decode");

        assert!(img.slice(0, 0).is_ok());
        assert!(matches!(img.slice(1, 0), Err(BitsyError::ImageFormat { .. })));
        assert!(matches!(img.slice(0, 1), Err(BitsyError::ImageFormat { .. })));
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let err = TwoToneImage::open(temp.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, BitsyError::FileAccess { .. }));
    }
}
