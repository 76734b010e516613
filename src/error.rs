//! Error type shared by the transcode, tagging and save pipeline modules.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can end a save operation.
///
/// All variants are terminal for the save in progress except
/// `ExplicitFlagWrite`, which the tag writer logs and carries on from.
#[derive(Error, Debug)]
pub enum Error {
    /// Save requested while nothing is selected.
    #[error("no file selected")]
    NoSelection,

    /// The encoder could not be started, exited non-zero, or produced no output.
    #[error("conversion of {} failed: {reason}", input.display())]
    ConversionFailed { input: PathBuf, reason: String },

    /// The conversion was cancelled before the encoder finished.
    #[error("conversion of {} was cancelled", input.display())]
    Cancelled { input: PathBuf },

    /// The target file is not an openable MP4 tag container.
    #[error("cannot open {} as an MP4 container: {source}", path.display())]
    ContainerOpen {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    /// Committing the tag container back to disk failed.
    #[error("cannot save tags to {}: {source}", path.display())]
    ContainerSave {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    /// Setting the explicit-content rating failed.
    #[error("cannot set explicit flag: {0}")]
    ExplicitFlagWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
