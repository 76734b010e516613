//! Writes a `TrackMetadata` record into an MP4 file's `ilst` atom list.

mod writer;

pub use writer::{ExplicitFlag, TagWriter};
#[cfg(test)]
use writer::verify_explicit_rating;
