//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema that drives the transcoder,
//! the tag writer and selection expansion, plus helpers to load it from disk.

mod load;
mod schema;

pub use schema::*;
