//! Configuration for bitsyroom
//!
//! Provides types and loading for the optional `bitsy.toml` file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
