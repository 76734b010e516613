use std::fs::File;
use std::path::Path;

use lofty::config::{ParseOptions, WriteOptions};
use lofty::mp4::{AdvisoryRating, Atom, AtomData, AtomIdent, Ilst, Mp4File};
use lofty::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::metadata::TrackMetadata;

const ALBUM_ARTIST_IDENT: AtomIdent<'static> = AtomIdent::Fourcc(*b"aART");
const RECORDING_DATE_IDENT: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9day");

/// What happened to the explicit-content rating during a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplicitFlag {
    /// Not requested; any existing rating was left alone.
    NotRequested,
    Applied,
    /// Setting the rating failed; the other fields were still saved.
    Failed(String),
}

/// Stateless writer committing metadata to target-format files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagWriter;

impl TagWriter {
    pub fn new() -> Self {
        Self
    }

    /// Replace the tag fields of the MP4 file at `path` with `metadata` and
    /// save once.
    ///
    /// Core fields are applied first, the explicit flag second; a failing
    /// flag is logged and reported in the returned [`ExplicitFlag`] but does
    /// not stop the save.
    pub fn write_tags(&self, path: &Path, metadata: &TrackMetadata) -> Result<ExplicitFlag> {
        let mut ilst = open_ilst(path)?;

        apply_core_fields(&mut ilst, metadata);

        let explicit = if metadata.explicit {
            match apply_explicit_flag(&mut ilst) {
                Ok(()) => ExplicitFlag::Applied,
                Err(e) => {
                    warn!(path = %path.display(), "{e}");
                    ExplicitFlag::Failed(e.to_string())
                }
            }
        } else {
            debug!("not explicit");
            ExplicitFlag::NotRequested
        };

        ilst.save_to_path(path, WriteOptions::default())
            .map_err(|source| Error::ContainerSave {
                path: path.to_path_buf(),
                source,
            })?;

        info!(path = %path.display(), title = %metadata.title, "tags saved");
        Ok(explicit)
    }
}

fn open_ilst(path: &Path) -> Result<Ilst> {
    let open_err = |source: lofty::error::LoftyError| Error::ContainerOpen {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(|e| open_err(e.into()))?;
    let mut mp4 = Mp4File::read_from(&mut file, ParseOptions::new().read_properties(false))
        .map_err(open_err)?;

    Ok(mp4.ilst_mut().map(std::mem::take).unwrap_or_default())
}

fn apply_core_fields(ilst: &mut Ilst, metadata: &TrackMetadata) {
    ilst.set_title(metadata.title.clone());
    ilst.set_artist(metadata.artist.clone());
    ilst.set_album(metadata.album.clone());
    ilst.replace_atom(Atom::new(
        ALBUM_ARTIST_IDENT,
        AtomData::UTF8(metadata.album_artist.clone()),
    ));
    ilst.set_genre(metadata.genre.clone());
    if metadata.year.is_empty() {
        let _ = ilst.remove(&RECORDING_DATE_IDENT);
    } else {
        ilst.replace_atom(Atom::new(
            RECORDING_DATE_IDENT,
            AtomData::UTF8(metadata.year.clone()),
        ));
    }
    ilst.set_track(metadata.track_number);
    ilst.set_track_total(metadata.track_total);
}

fn apply_explicit_flag(ilst: &mut Ilst) -> Result<()> {
    // lofty's setter cannot fail today; the read-back is what reports a failure.
    ilst.set_advisory_rating(AdvisoryRating::Explicit);
    verify_explicit_rating(ilst)
}

pub(super) fn verify_explicit_rating(ilst: &Ilst) -> Result<()> {
    match ilst.advisory_rating() {
        Some(AdvisoryRating::Explicit) => Ok(()),
        other => Err(Error::ExplicitFlagWrite(format!(
            "rating reads back as {other:?}"
        ))),
    }
}
