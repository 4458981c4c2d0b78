//! Tile model and its bitsydata encoding

use crate::error::{BitsyError, Result};
use crate::id::Id;
use crate::image::TILE_SIZE;

/// Number of bits in one frame mask.
const FRAME_BITS: u32 = TILE_SIZE * TILE_SIZE;

/// One 8x8 cell of a room, with one or two animation frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: Id,
    name: String,
    frames: Vec<u64>,
}

impl Tile {
    /// Create a tile from its frame masks.
    ///
    /// Fails with [`BitsyError::InvalidFrameCount`] unless there are 1 or 2
    /// frames.
    pub fn new(id: Id, name: impl Into<String>, frames: Vec<u64>) -> Result<Self> {
        if !(1..=2).contains(&frames.len()) {
            return Err(BitsyError::InvalidFrameCount(frames.len()));
        }
        Ok(Self { id, name: name.into(), frames })
    }

    /// The tile shared by every all-off cell in a run.
    pub fn empty() -> Self {
        Self { id: Id::EMPTY, name: "empty".to_string(), frames: vec![0] }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[u64] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.id == Id::EMPTY
    }

    /// Whether every frame mask is zero.
    pub fn is_frames_empty(frames: &[u64]) -> bool {
        frames.iter().all(|&f| f == 0)
    }

    /// Encode as a `TIL` record, terminated by a newline.
    pub fn encode(&self) -> String {
        let mut bitmap = encode_frame(self.frames[0]);
        if let [first, second] = self.frames[..] {
            if first != second {
                bitmap.push_str("\n>\n");
                bitmap.push_str(&encode_frame(second));
            }
        }

        format!("TIL {}\n{}\nNAME {}\nWAL false\n", self.id.encode(), bitmap, self.name)
    }
}

/// Render a frame mask as 8 rows of `0`/`1`, rows joined by newlines.
pub fn encode_frame(mask: u64) -> String {
    let mut out = String::with_capacity((FRAME_BITS + TILE_SIZE) as usize);
    for i in 0..FRAME_BITS {
        out.push(if mask & (1 << i) != 0 { '1' } else { '0' });

        if (i + 1) % TILE_SIZE == 0 && i + 1 != FRAME_BITS {
            out.push('\n');
        }
    }
    out
}
