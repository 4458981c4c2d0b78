//! Base-36 identifiers shared across a conversion run
//!
//! Room and tile ids are plain counters. The allocator is threaded through
//! encoding by `&mut` and advanced once per entity; entities keep a copy of
//! the value they were assigned.

use std::fmt;

/// Digits of the base-36 encoding, most significant first.
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A monotonically advancing identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Id(u64);

impl Id {
    /// The id reserved for the shared empty tile.
    pub const EMPTY: Id = Id(0);

    pub fn new(val: u64) -> Self {
        Self(val)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Advance to the next id.
    pub fn advance(&mut self) {
        self.0 += 1;
    }

    /// An independent id holding the current value.
    pub fn copy(&self) -> Id {
        *self
    }

    /// Encode as lowercase base-36 with no leading zeros.
    pub fn encode(&self) -> String {
        let base = ALPHABET.len() as u64;
        let mut digits = Vec::new();
        let mut i = self.0;
        while i != 0 {
            digits.push(ALPHABET[(i % base) as usize]);
            i /= base;
        }

        if digits.is_empty() {
            return "0".to_string();
        }

        digits.reverse();
        String::from_utf8(digits).unwrap_or_default()
    }

    /// Parse the base-36 text produced by [`Id::encode`].
    ///
    /// Returns `None` for empty input, characters outside `0-9a-z`, or a
    /// value that overflows the counter.
    pub fn decode(text: &str) -> Option<Id> {
        if text.is_empty() {
            return None;
        }

        let base = ALPHABET.len() as u64;
        let mut val: u64 = 0;
        for c in text.bytes() {
            let digit = ALPHABET.iter().position(|&a| a == c)? as u64;
            val = val.checked_mul(base)?.checked_add(digit)?;
        }

        Some(Id(val))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
