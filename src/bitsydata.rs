//! Reading the bitsydata text format
//!
//! Records are groups of lines separated by a blank line. Only `ROOM` and
//! `TIL` records are interpreted; any other record (palettes, sprites,
//! game settings) is skipped.

use crate::error::{BitsyError, Result};
use crate::id::Id;
use crate::image::TILE_SIZE;
use crate::room::ROOM_SIZE;

/// The kind of a single bitsydata line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `TIL <id>`
    TileHeader,
    /// `WAL <bool>`
    Wall,
    /// An empty line ending a record
    Blank,
    /// Anything else: bitmap rows, names, other records
    Other,
}

/// Classify a line, ignoring its line terminator.
pub fn classify(line: &str) -> LineKind {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.starts_with("TIL") {
        LineKind::TileHeader
    } else if line.starts_with("WAL") {
        LineKind::Wall
    } else if line.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Other
    }
}

/// A parsed `ROOM` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub id: Id,
    pub name: Option<String>,
    /// Tile ids, one row per grid line
    pub grid: Vec<Vec<Id>>,
}

/// A parsed `TIL` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    pub id: Id,
    pub name: Option<String>,
    /// Frame masks, bit `row * 8 + col`
    pub frames: Vec<u64>,
    pub wall: Option<bool>,
}

/// The rooms and tiles of a bitsydata file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub rooms: Vec<RoomRecord>,
    pub tiles: Vec<TileRecord>,
}

impl Document {
    /// Parse bitsydata text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut doc = Document::default();
        let lines: Vec<(usize, &str)> = text.lines().enumerate().map(|(i, l)| (i + 1, l)).collect();

        for record in lines.split(|(_, l)| l.trim_end_matches('\r').is_empty()) {
            let Some(&(line_no, header)) = record.first() else {
                continue;
            };
            let header = header.trim_end_matches('\r');

            if let Some(id) = header.strip_prefix("ROOM ") {
                doc.rooms.push(parse_room(line_no, id, &record[1..])?);
            } else if let Some(id) = header.strip_prefix("TIL ") {
                doc.tiles.push(parse_tile(line_no, id, &record[1..])?);
            }
        }

        Ok(doc)
    }

    /// Look up a tile record by id.
    pub fn tile(&self, id: Id) -> Option<&TileRecord> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Grid references that have no matching tile record, as
    /// `(room id, tile id)` pairs.
    pub fn unresolved_references(&self) -> Vec<(Id, Id)> {
        let mut missing = Vec::new();
        for room in &self.rooms {
            for &id in room.grid.iter().flatten() {
                if self.tile(id).is_none() && !missing.contains(&(room.id, id)) {
                    missing.push((room.id, id));
                }
            }
        }
        missing
    }

    /// Tile ids defined by more than one record.
    pub fn duplicate_tiles(&self) -> Vec<Id> {
        let mut seen = Vec::new();
        let mut dups = Vec::new();
        for tile in &self.tiles {
            if seen.contains(&tile.id) {
                if !dups.contains(&tile.id) {
                    dups.push(tile.id);
                }
            } else {
                seen.push(tile.id);
            }
        }
        dups
    }
}

fn parse_id(line_no: usize, text: &str) -> Result<Id> {
    let text = text.trim();
    Id::decode(text).ok_or_else(|| BitsyError::malformed(line_no, format!("invalid id '{}'", text)))
}

fn parse_room(line_no: usize, id: &str, body: &[(usize, &str)]) -> Result<RoomRecord> {
    let id = parse_id(line_no, id)?;
    let size = ROOM_SIZE as usize;
    if body.len() < size {
        return Err(BitsyError::malformed(
            line_no,
            format!("room {} has fewer than {} grid rows", id, size),
        ));
    }

    let mut grid = Vec::with_capacity(size);
    for &(n, row) in &body[..size] {
        let ids = row
            .trim_end_matches('\r')
            .split(',')
            .map(|cell| parse_id(n, cell))
            .collect::<Result<Vec<_>>>()?;
        if ids.len() != size {
            return Err(BitsyError::malformed(
                n,
                format!("expected {} cells, found {}", size, ids.len()),
            ));
        }
        grid.push(ids);
    }

    let name = body[size..]
        .iter()
        .find_map(|(_, l)| l.strip_prefix("NAME "))
        .map(|n| n.trim_end_matches('\r').to_string());

    Ok(RoomRecord { id, name, grid })
}

fn parse_tile(line_no: usize, id: &str, body: &[(usize, &str)]) -> Result<TileRecord> {
    let id = parse_id(line_no, id)?;
    let rows = TILE_SIZE as usize;

    let mut frames = Vec::new();
    let mut rest = body;
    loop {
        if rest.len() < rows {
            return Err(BitsyError::malformed(
                line_no,
                format!("tile {} has fewer than {} bitmap rows", id, rows),
            ));
        }
        frames.push(parse_frame(&rest[..rows])?);
        rest = &rest[rows..];

        match rest.first() {
            Some((_, l)) if l.trim_end_matches('\r') == ">" => rest = &rest[1..],
            _ => break,
        }
    }

    let mut name = None;
    let mut wall = None;
    for &(n, line) in rest {
        let line = line.trim_end_matches('\r');
        if let Some(v) = line.strip_prefix("NAME ") {
            name = Some(v.to_string());
        } else if let Some(v) = line.strip_prefix("WAL ") {
            wall = match v.trim() {
                "true" => Some(true),
                "false" => Some(false),
                other => {
                    return Err(BitsyError::malformed(n, format!("invalid wall flag '{}'", other)));
                }
            };
        }
    }

    Ok(TileRecord { id, name, frames, wall })
}

/// Parse 8 bitmap rows into a frame mask.
fn parse_frame(rows: &[(usize, &str)]) -> Result<u64> {
    let mut mask = 0u64;
    for (r, &(n, row)) in rows.iter().enumerate() {
        let row = row.trim_end_matches('\r');
        if row.len() != TILE_SIZE as usize {
            return Err(BitsyError::malformed(
                n,
                format!("bitmap row '{}' is not {} wide", row, TILE_SIZE),
            ));
        }
        for (c, ch) in row.chars().enumerate() {
            match ch {
                '1' => mask |= 1 << (r * TILE_SIZE as usize + c),
                '0' => {}
                _ => {
                    return Err(BitsyError::malformed(
                        n,
                        format!("unexpected bitmap character '{}'", ch),
                    ));
                }
            }
        }
    }
    Ok(mask)
}
