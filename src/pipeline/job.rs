use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};
use crate::transcode::CancelToken;

use super::save::{SaveOutcome, SavePipeline, SaveRequest};

/// A save running on its own thread.
///
/// The result arrives over a channel; cancelling stops an in-flight conversion,
/// in which case no tags are written.
pub struct SaveJob {
    cancel: CancelToken,
    rx: Receiver<Result<SaveOutcome>>,
    join: Option<JoinHandle<()>>,
}

impl SaveJob {
    pub fn spawn(pipeline: Arc<SavePipeline>, request: SaveRequest) -> Self {
        let (tx, rx) = mpsc::channel();
        let cancel = CancelToken::new();
        let token = cancel.clone();

        let join = thread::spawn(move || {
            let result = pipeline.save(&request, &token);
            // The receiver may already be gone if the job was dropped.
            let _ = tx.send(result);
        });

        Self {
            cancel,
            rx,
            join: Some(join),
        }
    }

    /// Handle that cancels this job, usable from another thread or a signal handler.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Block until the save finishes.
    pub fn wait(mut self) -> Result<SaveOutcome> {
        let result = self.rx.recv().unwrap_or_else(|_| {
            Err(Error::Io(io::Error::other("save job ended without a result")))
        });
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
        result
    }
}
