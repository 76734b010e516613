//! Turns the operator's raw path list into the ordered selection a save acts on.

mod scan;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::SelectionSettings;

pub use scan::expand_dir;

/// Ordered, de-duplicated list of existing audio files picked by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    paths: Vec<PathBuf>,
}

impl Selection {
    /// Build a selection from raw paths, keeping the operator's order.
    ///
    /// Directories are expanded into the audio files they contain. Paths that
    /// do not exist are skipped, and a path seen twice is only kept once.
    pub fn collect<I, P>(raw: I, settings: &SelectionSettings) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut paths = Vec::new();

        for p in raw {
            let p = p.as_ref();
            let found = if p.is_dir() {
                expand_dir(p, settings)
            } else if p.is_file() {
                vec![p.to_path_buf()]
            } else {
                warn!(path = %p.display(), "not added: no such file");
                continue;
            };

            for f in found {
                if seen.insert(f.clone()) {
                    paths.push(f);
                } else {
                    debug!(path = %f.display(), "already selected");
                }
            }
        }

        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// The file a save acts on.
    pub fn first(&self) -> Option<&Path> {
        self.paths.first().map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl From<Vec<PathBuf>> for Selection {
    /// Wrap an already-resolved list as-is.
    fn from(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}
