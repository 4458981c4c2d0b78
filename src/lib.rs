//! Bitsyroom - convert pixel-art room images into bitsy game data
//!
//! This library provides functionality to:
//! - Slice two-tone room images into 8x8 tiles
//! - Encode rooms and tiles as bitsydata with stable base-36 ids
//! - Read bitsydata records back and mark dense tiles as walls

pub mod bitsydata;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod id;
pub mod image;
pub mod room;
pub mod tile;
pub mod walls;

#[cfg(test)]
mod testutil;

pub use error::{BitsyError, Result};
