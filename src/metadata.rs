//! Metadata records exchanged between the front end and the tag writer.
//!
//! `FormFields` is what the operator typed, `TrackMetadata` is what gets
//! written: the year is coerced and the track position is pinned.

mod model;
mod year;

pub use model::*;
pub use year::is_valid_year;
