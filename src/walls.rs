//! Wall annotation for tiles in existing bitsydata
//!
//! Each `TIL` block gets a `WAL` flag derived from how many pixels of its
//! first frame are on. An existing `WAL` line is rewritten; otherwise one is
//! inserted before the blank line that ends the block. Every other line is
//! passed through unchanged.

use std::fs;
use std::path::Path;

use crate::bitsydata::{classify, LineKind};
use crate::error::{BitsyError, Result};
use crate::image::TILE_SIZE;

/// Tiles with more on pixels than this in their first frame are walls.
///
/// Policy value, not derived from anything.
pub const WALL_THRESHOLD: usize = 20;

/// Whether a tile with `on_pixels` set in its first frame is a wall.
pub fn is_wall(on_pixels: usize) -> bool {
    on_pixels > WALL_THRESHOLD
}

/// Counts collected while annotating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallSummary {
    /// Tile blocks seen
    pub tiles: usize,
    /// Tiles flagged as walls
    pub walls: usize,
    /// Existing `WAL` lines rewritten
    pub replaced: usize,
    /// `WAL` lines inserted
    pub inserted: usize,
}

/// The result of annotating bitsydata text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    pub text: String,
    pub summary: WallSummary,
}

/// Set the `WAL` flag of every tile block in `text`.
pub fn annotate(text: &str) -> Result<Annotated> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let kinds: Vec<LineKind> = lines.iter().map(|l| classify(l)).collect();
    let rows = TILE_SIZE as usize;

    let mut out = String::with_capacity(text.len() + 64);
    let mut summary = WallSummary::default();
    let mut i = 0;

    while i < lines.len() {
        if kinds[i] != LineKind::TileHeader {
            out.push_str(lines[i]);
            i += 1;
            continue;
        }

        let header = i + 1;
        let bitmap_end = i + 1 + rows;
        if bitmap_end > lines.len() {
            return Err(BitsyError::malformed(
                header,
                format!("expected {} bitmap rows after the tile header", rows),
            ));
        }

        let on_pixels: usize =
            lines[i + 1..bitmap_end].iter().map(|l| l.matches('1').count()).sum();
        let wall = is_wall(on_pixels);
        let wall_line = format!("WAL {}\n", wall);
        log::trace!(
            "{} at line {}: {} on pixel(s), wall {}",
            lines[i].trim_end(),
            header,
            on_pixels,
            wall
        );

        summary.tiles += 1;
        if wall {
            summary.walls += 1;
        }

        for line in &lines[i..bitmap_end] {
            out.push_str(line);
        }

        let mut j = bitmap_end;
        loop {
            match kinds.get(j) {
                None => {
                    return Err(BitsyError::malformed(
                        header,
                        "no WAL line or blank line before end of file",
                    ));
                }
                Some(LineKind::Wall) => {
                    out.push_str(&wall_line);
                    summary.replaced += 1;
                    j += 1;
                    break;
                }
                Some(LineKind::Blank) => {
                    out.push_str(&wall_line);
                    out.push_str(lines[j]);
                    summary.inserted += 1;
                    j += 1;
                    break;
                }
                Some(_) => {
                    out.push_str(lines[j]);
                    j += 1;
                }
            }
        }

        i = j;
    }

    Ok(Annotated { text: out, summary })
}

/// Annotate the bitsydata file at `path` in place.
///
/// The file is only rewritten once the whole text has been processed.
pub fn annotate_file(path: &Path) -> Result<WallSummary> {
    let text = fs::read_to_string(path).map_err(|e| BitsyError::file_access(path, e))?;
    let annotated = annotate(&text)?;
    fs::write(path, &annotated.text).map_err(|e| BitsyError::file_access(path, e))?;

    log::info!(
        "{}: {} tile(s), {} wall(s), {} flag(s) rewritten, {} inserted",
        path.display(),
        annotated.summary.tiles,
        annotated.summary.walls,
        annotated.summary.replaced,
        annotated.summary.inserted
    );
    Ok(annotated.summary)
}
