use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::metadata::{FormFields, TrackMetadata};
use crate::selection::Selection;
use crate::tagging::{ExplicitFlag, TagWriter};
use crate::transcode::{CancelToken, Encoder, FfmpegEncoder, Transcoder};

/// Everything the front end supplies for one save.
#[derive(Debug, Clone, Default)]
pub struct SaveRequest {
    pub selection: Selection,
    pub fields: FormFields,
    pub explicit: bool,
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The selected file.
    pub source: PathBuf,
    /// The file whose tags were written.
    pub target: PathBuf,
    /// Whether `target` was produced by the encoder.
    pub converted: bool,
    pub explicit_flag: ExplicitFlag,
}

/// Sequences the transcoder and the tag writer for one request at a time.
pub struct SavePipeline {
    transcoder: Transcoder,
    writer: TagWriter,
    fallback_year: String,
}

impl SavePipeline {
    pub fn new(
        transcoder: Transcoder,
        writer: TagWriter,
        fallback_year: impl Into<String>,
    ) -> Self {
        Self {
            transcoder,
            writer,
            fallback_year: fallback_year.into(),
        }
    }

    /// Production wiring: ffmpeg-backed transcoder writing below `work_dir`.
    pub fn from_settings(settings: &Settings, work_dir: &Path) -> Self {
        let encoder: Box<dyn Encoder> = Box::new(FfmpegEncoder::new(&settings.transcode));
        Self::new(
            Transcoder::new(encoder, &settings.transcode, work_dir),
            TagWriter::new(),
            settings.tagging.fallback_year.clone(),
        )
    }

    /// Save the first selected file. Tags are only written after the
    /// conversion (if any) has verifiably succeeded; raising `cancel` stops
    /// the encoder and skips tagging.
    pub fn save(&self, request: &SaveRequest, cancel: &CancelToken) -> Result<SaveOutcome> {
        let Some(source) = request.selection.first() else {
            warn!("no items selected, select a file to save");
            return Err(Error::NoSelection);
        };

        let ignored = request.selection.len() - 1;
        if ignored > 0 {
            warn!(ignored, "only the first selected file is saved");
        }

        let target = self.transcoder.normalize(source, cancel)?;
        if cancel.is_cancelled() {
            return Err(Error::Cancelled {
                input: source.to_path_buf(),
            });
        }

        let metadata =
            TrackMetadata::from_form(&request.fields, request.explicit, &self.fallback_year);
        let explicit_flag = self.writer.write_tags(&target, &metadata)?;

        let outcome = SaveOutcome {
            source: source.to_path_buf(),
            converted: target != source,
            target,
            explicit_flag,
        };
        info!(target = %outcome.target.display(), converted = outcome.converted, "saved");
        Ok(outcome)
    }
}
