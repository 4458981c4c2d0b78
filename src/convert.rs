//! Conversion of a directory of room images into bitsydata
//!
//! Files named `<room>.png` or `<room>@<frame>.png` are grouped into rooms
//! by base name. Rooms are encoded in sorted file order with one pair of id
//! allocators for the whole run, so the output is stable across runs.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use glob::glob;
use regex::Regex;

use crate::error::{BitsyError, Result};
use crate::id::Id;
use crate::room::Room;
use crate::tile::Tile;

/// Options for a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Emit only the tile records, without rooms
    pub only_tiles: bool,
}

/// Matches a file stem with an optional `@<frame>` suffix.
fn frame_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?P<name>.*?)@(?P<frame>\d+)$").expect("valid frame regex"))
}

/// Split a file stem into its room name and frame index, if any.
///
/// `"cave@1"` is `("cave", Some(1))`; `"cave"` is `("cave", None)`.
pub fn split_frame_suffix(stem: &str) -> (&str, Option<usize>) {
    match frame_suffix_re().captures(stem) {
        Some(caps) => {
            let name = caps.name("name").map_or(stem, |m| m.as_str());
            let frame = caps.name("frame").and_then(|m| m.as_str().parse().ok());
            (name, frame)
        }
        None => (stem, None),
    }
}

/// List the `.png` regular files in `dir`, sorted by file name.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(BitsyError::file_access(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "room directory not found"),
        ));
    }

    let pattern = format!("{}/*.png", glob::Pattern::escape(&dir.to_string_lossy()));
    let paths = glob(&pattern).map_err(|e| {
        BitsyError::file_access(dir, std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            BitsyError::file_access(path, e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Group image files into rooms in order of first appearance.
pub fn group_rooms(files: &[PathBuf]) -> Vec<Room> {
    let mut rooms: Vec<Room> = Vec::new();
    for file in files {
        let Some(stem) = file.file_stem().map(|s| s.to_string_lossy()) else {
            continue;
        };
        let (name, _) = split_frame_suffix(&stem);

        match rooms.iter_mut().find(|r| r.name() == name) {
            Some(room) => room.add_frame(),
            None => {
                let mut room = Room::new(name);
                room.add_frame();
                rooms.push(room);
            }
        }
    }
    rooms
}

/// Find every room in `dir`.
pub fn discover_rooms(dir: &Path) -> Result<Vec<Room>> {
    let files = discover_images(dir)?;
    Ok(group_rooms(&files))
}

/// Encode `rooms` (whose images live in `dir`) into bitsydata.
///
/// Room ids start at 0; tile ids start at 1, with 0 reserved for the empty
/// tile, which is emitted once at the head of the tile records.
pub fn encode_rooms(dir: &Path, rooms: &[Room], options: &ConvertOptions) -> Result<String> {
    let mut room_ids = Id::new(0);
    let mut tile_ids = Id::new(1);

    let mut rooms_text = String::new();
    let mut tiles_text = Tile::empty().encode();
    tiles_text.push('\n');

    for (i, room) in rooms.iter().enumerate() {
        let encoded = room.encode(dir, &mut room_ids, &mut tile_ids)?;
        rooms_text.push_str(&encoded.room);
        tiles_text.push_str(&encoded.tiles);

        if i + 1 != rooms.len() {
            rooms_text.push('\n');
        }
    }

    log::info!(
        "converted {} room(s) into {} tile(s)",
        rooms.len(),
        tile_ids.value() - 1
    );

    if options.only_tiles {
        Ok(tiles_text)
    } else {
        Ok(format!("{}\n{}", rooms_text, tiles_text))
    }
}

/// Convert every room image in `dir` into bitsydata text.
pub fn convert_dir(dir: &Path, options: &ConvertOptions) -> Result<String> {
    let rooms = discover_rooms(dir)?;
    if rooms.is_empty() {
        log::warn!("no room images found in {}", dir.display());
    }
    for room in &rooms {
        log::debug!("found room '{}' with {} frame(s)", room.name(), room.frame_count());
    }
    encode_rooms(dir, &rooms, options)
}
