//! Fixtures shared by the unit tests: a tiny MP4 container and fake encoders.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use lofty::config::ParseOptions;
use lofty::mp4::{Ilst, Mp4File};
use lofty::prelude::*;

use crate::error::{Error, Result};
use crate::transcode::{CancelToken, Encoder};

fn atom(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = ((8 + payload.len()) as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(payload);
    out
}

/// Bytes of an M4A file with an empty movie header and no tags.
pub fn minimal_m4a() -> Vec<u8> {
    let mut ftyp = Vec::new();
    ftyp.extend_from_slice(b"M4A ");
    ftyp.extend_from_slice(&0u32.to_be_bytes());
    ftyp.extend_from_slice(b"M4A mp42isom");

    let mut mvhd = Vec::with_capacity(100);
    mvhd.extend_from_slice(&[0; 4]); // version + flags
    mvhd.extend_from_slice(&0u32.to_be_bytes()); // creation time
    mvhd.extend_from_slice(&0u32.to_be_bytes()); // modification time
    mvhd.extend_from_slice(&1000u32.to_be_bytes()); // timescale
    mvhd.extend_from_slice(&0u32.to_be_bytes()); // duration
    mvhd.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // rate 1.0
    mvhd.extend_from_slice(&0x0100u16.to_be_bytes()); // volume 1.0
    mvhd.extend_from_slice(&[0; 10]);
    for v in [0x0001_0000u32, 0, 0, 0, 0x0001_0000, 0, 0, 0, 0x4000_0000] {
        mvhd.extend_from_slice(&v.to_be_bytes());
    }
    mvhd.extend_from_slice(&[0; 24]);
    mvhd.extend_from_slice(&1u32.to_be_bytes()); // next track id

    let mut out = atom(b"ftyp", &ftyp);
    out.extend(atom(b"moov", &atom(b"mvhd", &mvhd)));
    out.extend(atom(b"mdat", &[0; 16]));
    out
}

pub fn write_minimal_m4a(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, minimal_m4a()).unwrap();
}

/// The `ilst` of an MP4 file, empty when the file carries none.
pub fn read_ilst(path: &Path) -> Ilst {
    let mut file = fs::File::open(path).unwrap();
    let mp4 = Mp4File::read_from(&mut file, ParseOptions::new().read_properties(false)).unwrap();
    mp4.ilst().cloned().unwrap_or_default()
}

/// Writes a minimal M4A to the output and records every call.
#[derive(Default)]
pub struct FakeEncoder {
    pub calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl FakeEncoder {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Encoder for FakeEncoder {
    fn encode(&self, input: &Path, output: &Path, _cancel: &CancelToken) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((input.to_path_buf(), output.to_path_buf()));
        fs::write(output, minimal_m4a())?;
        Ok(())
    }
}

impl Encoder for std::sync::Arc<FakeEncoder> {
    fn encode(&self, input: &Path, output: &Path, cancel: &CancelToken) -> Result<()> {
        (**self).encode(input, output, cancel)
    }
}

/// Fails like an encoder exiting non-zero.
pub struct FailingEncoder;

impl Encoder for FailingEncoder {
    fn encode(&self, input: &Path, _output: &Path, _cancel: &CancelToken) -> Result<()> {
        Err(Error::ConversionFailed {
            input: input.to_path_buf(),
            reason: "exit status: 1".to_string(),
        })
    }
}

/// Reports success without writing anything.
pub struct SilentEncoder;

impl Encoder for SilentEncoder {
    fn encode(&self, _input: &Path, _output: &Path, _cancel: &CancelToken) -> Result<()> {
        Ok(())
    }
}

/// Writes a partial output, then blocks until cancelled.
pub struct StallingEncoder;

impl Encoder for StallingEncoder {
    fn encode(&self, input: &Path, output: &Path, cancel: &CancelToken) -> Result<()> {
        fs::write(output, b"partial")?;
        while !cancel.is_cancelled() {
            thread::sleep(Duration::from_millis(5));
        }
        fs::remove_file(output)?;
        Err(Error::Cancelled {
            input: input.to_path_buf(),
        })
    }
}
