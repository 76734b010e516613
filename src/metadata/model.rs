use tracing::debug;

use super::year::coerce_year;

/// Track position every save writes, as `(number, total)`.
pub const TRACK_POSITION: (u32, u32) = (1, 1);

/// Raw text values supplied by the front end for a single save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub genre: String,
    pub year: String,
    /// Accepted for completeness; the written track position is always
    /// [`TRACK_POSITION`].
    pub track: String,
}

/// The full set of tag values committed to a container. Replaces whatever
/// the container held before; nothing is merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub genre: String,
    pub year: String,
    pub track_number: u32,
    pub track_total: u32,
    pub explicit: bool,
}

impl TrackMetadata {
    /// Build the record to write from the operator's form values.
    pub fn from_form(fields: &FormFields, explicit: bool, fallback_year: &str) -> Self {
        if !fields.track.trim().is_empty() {
            debug!(
                requested = %fields.track.trim(),
                "ignoring requested track number, writing {}/{}",
                TRACK_POSITION.0,
                TRACK_POSITION.1
            );
        }

        Self {
            title: fields.title.clone(),
            artist: fields.artist.clone(),
            album: fields.album.clone(),
            album_artist: fields.album_artist.clone(),
            genre: fields.genre.clone(),
            year: coerce_year(&fields.year, fallback_year),
            track_number: TRACK_POSITION.0,
            track_total: TRACK_POSITION.1,
            explicit,
        }
    }
}
