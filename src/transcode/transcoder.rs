use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::TranscodeSettings;
use crate::error::{Error, Result};

use super::cancel::CancelToken;
use super::encoder::Encoder;

/// Makes any input available in the target container without touching it.
pub struct Transcoder {
    encoder: Box<dyn Encoder>,
    target_extension: String,
    output_dir: PathBuf,
}

impl Transcoder {
    /// `work_dir` anchors the configured output directory, normally the
    /// current working directory.
    pub fn new(encoder: Box<dyn Encoder>, settings: &TranscodeSettings, work_dir: &Path) -> Self {
        Self {
            encoder,
            target_extension: settings
                .target_extension
                .trim()
                .trim_start_matches('.')
                .to_ascii_lowercase(),
            output_dir: work_dir.join(&settings.output_dir),
        }
    }

    /// True unless `path` already carries the target extension.
    pub fn needs_conversion(&self, path: &Path) -> bool {
        !path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.target_extension))
            .unwrap_or(false)
    }

    /// Where the converted copy of `source` is written:
    /// `<output_dir>/<file stem>.<target extension>`.
    pub fn output_path(&self, source: &Path) -> Option<PathBuf> {
        let stem = source.file_stem()?;
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(&self.target_extension);
        Some(self.output_dir.join(name))
    }

    /// Return a path to `path`'s content in the target format, converting
    /// when needed. Conversion always re-runs the encoder and is aborted
    /// once `cancel` is raised.
    pub fn normalize(&self, path: &Path, cancel: &CancelToken) -> Result<PathBuf> {
        if !self.needs_conversion(path) {
            debug!(path = %path.display(), "already in target format");
            return Ok(path.to_path_buf());
        }

        let output = self
            .output_path(path)
            .ok_or_else(|| Error::ConversionFailed {
                input: path.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?;

        fs::create_dir_all(&self.output_dir)?;

        info!(input = %path.display(), output = %output.display(), "converting");
        self.encoder.encode(path, &output, cancel)?;

        if !output.is_file() {
            return Err(Error::ConversionFailed {
                input: path.to_path_buf(),
                reason: format!("encoder produced no {}", output.display()),
            });
        }

        info!(output = %output.display(), "converted");
        Ok(output)
    }
}
