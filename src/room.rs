//! Room model: slicing a 16x16 grid of tiles out of frame images

use std::path::{Path, PathBuf};

use crate::error::{BitsyError, Result};
use crate::id::Id;
use crate::image::TwoToneImage;
use crate::tile::Tile;

/// Rooms are a square grid of this many tiles per side.
pub const ROOM_SIZE: u32 = 16;

/// The bitsydata produced by encoding one room.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedRoom {
    /// The `ROOM` record
    pub room: String,
    /// `TIL` records for the room's non-empty tiles, each followed by a blank line
    pub tiles: String,
}

/// A room discovered from one or more frame images sharing a base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    frames: usize,
}

impl Room {
    /// Create a room with no frames yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), frames: 0 }
    }

    /// Count another frame image for this room.
    pub fn add_frame(&mut self) {
        self.frames += 1;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Resolve the image path of every frame under `dir`.
    ///
    /// Frame 0 prefers `<name>.png` and falls back to `<name>@0.png`; later
    /// frames are always `<name>@<i>.png`.
    pub fn frame_paths(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(self.frames);
        for i in 0..self.frames {
            let bare = dir.join(format!("{}.png", self.name));
            let path = if i == 0 && bare.is_file() {
                bare
            } else {
                dir.join(format!("{}@{}.png", self.name, i))
            };

            if !path.is_file() {
                return Err(BitsyError::MissingAsset { path });
            }
            paths.push(path);
        }
        Ok(paths)
    }

    /// Encode the room and its tiles, advancing both allocators.
    ///
    /// Each non-empty cell takes the next tile id; all-off cells reference
    /// the shared empty tile and consume nothing. The room id advances once.
    pub fn encode(&self, dir: &Path, room_ids: &mut Id, tile_ids: &mut Id) -> Result<EncodedRoom> {
        if !(1..=2).contains(&self.frames) {
            return Err(BitsyError::InvalidFrameCount(self.frames));
        }

        let images = self
            .frame_paths(dir)?
            .iter()
            .map(TwoToneImage::open)
            .collect::<Result<Vec<_>>>()?;

        let cells = (ROOM_SIZE * ROOM_SIZE) as usize;
        let mut grid: Vec<Id> = Vec::with_capacity(cells);
        let mut tiles: Vec<Tile> = Vec::new();

        for y in 0..ROOM_SIZE {
            for x in 0..ROOM_SIZE {
                let slices =
                    images.iter().map(|img| img.slice(x, y)).collect::<Result<Vec<u64>>>()?;

                if Tile::is_frames_empty(&slices) {
                    grid.push(Id::EMPTY);
                    continue;
                }

                let name = format!("{} ({},{})", self.name, x, y);
                let tile = Tile::new(tile_ids.copy(), name, slices)?;
                log::trace!("room '{}' cell ({},{}) -> tile {}", self.name, x, y, tile.id());
                grid.push(tile.id());
                tiles.push(tile);
                tile_ids.advance();
            }
        }

        let room = format!(
            "ROOM {}\n{}\nNAME {}\nPAL 0\n",
            room_ids.encode(),
            encode_grid(&grid),
            self.name
        );

        let mut tiles_text = String::new();
        for tile in &tiles {
            tiles_text.push_str(&tile.encode());
            tiles_text.push('\n');
        }

        log::debug!(
            "encoded room '{}' as {} with {} frame(s), {} tile(s)",
            self.name,
            room_ids,
            images.len(),
            tiles.len()
        );
        room_ids.advance();

        Ok(EncodedRoom { room, tiles: tiles_text })
    }
}

/// Join cell ids into 16 comma-separated rows.
fn encode_grid(grid: &[Id]) -> String {
    grid.chunks(ROOM_SIZE as usize)
        .map(|row| row.iter().map(Id::encode).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}
