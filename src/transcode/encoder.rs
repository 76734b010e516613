use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, SystemTime};

use tracing::{debug, info, warn};

use crate::config::TranscodeSettings;
use crate::error::{Error, Result};

use super::cancel::CancelToken;

/// Lines of encoder stderr kept in a `ConversionFailed` message.
const STDERR_TAIL_LINES: usize = 5;

/// Produces `output` in the target format from `input`.
///
/// Implementations block until the output is complete, the conversion fails
/// or `cancel` is raised. `input` is never modified.
pub trait Encoder: Send + Sync {
    fn encode(&self, input: &Path, output: &Path, cancel: &CancelToken) -> Result<()>;
}

/// Runs an external ffmpeg-compatible encoder:
/// `<program> [-y] -i <input> -c:a <codec> [-strict experimental] -b:a <bitrate> <output>`.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
    codec: String,
    bitrate: String,
    strict_experimental: bool,
    overwrite: bool,
    poll_interval: Duration,
}

impl FfmpegEncoder {
    pub fn new(settings: &TranscodeSettings) -> Self {
        Self {
            program: PathBuf::from(&settings.encoder),
            codec: settings.codec.clone(),
            bitrate: settings.bitrate.clone(),
            strict_experimental: settings.strict_experimental,
            overwrite: settings.overwrite,
            poll_interval: Duration::from_millis(settings.poll_interval_ms.max(1)),
        }
    }

    /// Arguments passed to the encoder for one conversion.
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(12);
        if self.overwrite {
            args.push("-y".into());
        }
        args.push("-i".into());
        args.push(input.into());
        args.push("-c:a".into());
        args.push(self.codec.as_str().into());
        if self.strict_experimental {
            args.push("-strict".into());
            args.push("experimental".into());
        }
        args.push("-b:a".into());
        args.push(self.bitrate.as_str().into());
        args.push(output.into());
        args
    }

    fn failed(&self, input: &Path, reason: String) -> Error {
        Error::ConversionFailed {
            input: input.to_path_buf(),
            reason,
        }
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(&self, input: &Path, output: &Path, cancel: &CancelToken) -> Result<()> {
        let args = self.args(input, output);
        debug!(program = %self.program.display(), ?args, "starting encoder");

        let before = output_stamp(output);

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                self.failed(
                    input,
                    format!("cannot start {}: {e}", self.program.display()),
                )
            })?;

        // ffmpeg is chatty on stderr; drain it so the pipe never fills up.
        let drain = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf);
                String::from_utf8_lossy(&buf).into_owned()
            })
        });

        let status: ExitStatus = loop {
            if cancel.is_cancelled() {
                let _ = child.kill();
                let _ = child.wait();
                let after = output_stamp(output);
                if after.is_some() && after != before {
                    if let Err(e) = fs::remove_file(output) {
                        warn!(path = %output.display(), "cannot remove partial output: {e}");
                    }
                }
                info!(input = %input.display(), "conversion cancelled");
                return Err(Error::Cancelled {
                    input: input.to_path_buf(),
                });
            }
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => thread::sleep(self.poll_interval),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e.into());
                }
            }
        };

        let stderr = drain.and_then(|h| h.join().ok()).unwrap_or_default();

        if !status.success() {
            return Err(self.failed(
                input,
                format!(
                    "{} exited with {status}: {}",
                    self.program.display(),
                    stderr_tail(&stderr)
                ),
            ));
        }

        Ok(())
    }
}

/// Size and modification time of `path`, if it exists.
fn output_stamp(path: &Path) -> Option<(u64, SystemTime)> {
    let meta = fs::metadata(path).ok()?;
    Some((meta.len(), meta.modified().ok()?))
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_tail_keeps_last_non_empty_lines() {
        let log = "a\n\nb\nc\nd\ne\nf\n  \n";
        assert_eq!(stderr_tail(log), "b | c | d | e | f");
        assert_eq!(stderr_tail(""), "");
    }

    #[test]
    fn output_stamp_tracks_rewrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.m4a");
        assert_eq!(output_stamp(&path), None);

        fs::write(&path, b"old").unwrap();
        let first = output_stamp(&path);
        assert!(first.is_some());
        assert_eq!(output_stamp(&path), first);

        fs::write(&path, b"newer").unwrap();
        assert_ne!(output_stamp(&path), first);
    }
}
