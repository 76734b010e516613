//! Normalizes input files to the target container before tagging.
//!
//! `Transcoder` decides whether a file needs converting and where the result
//! goes; the actual work is delegated to an [`Encoder`], `FfmpegEncoder` in
//! production.

mod cancel;
mod encoder;
mod transcoder;

pub use cancel::CancelToken;
pub use encoder::{Encoder, FfmpegEncoder};
pub use transcoder::Transcoder;
