use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::SelectionSettings;

impl SelectionSettings {
    /// Whether `path` carries one of the configured extensions, ignoring case
    /// and a leading dot in the configured value.
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.'))
            .any(|e| !e.is_empty() && e.eq_ignore_ascii_case(ext))
    }

    /// Deepest walk level below the selected directory (which is level 0).
    fn walk_depth(&self) -> usize {
        match (self.recursive, self.max_depth) {
            (false, _) => 1,
            (true, Some(depth)) => depth,
            (true, None) => usize::MAX,
        }
    }
}

fn is_dotfile(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|n| n.starts_with('.'))
}

/// List the audio files below `dir`, sorted by path.
pub fn expand_dir(dir: &Path, settings: &SelectionSettings) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .max_depth(settings.walk_depth())
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || settings.include_hidden || !is_dotfile(e))
        .filter_map(|entry| {
            entry
                .inspect_err(|err| debug!(dir = %dir.display(), "skipping entry: {err}"))
                .ok()
        })
        .map(DirEntry::into_path)
        .filter(|p| p.is_file() && settings.accepts(p))
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .filter_map(|p| p.file_name().and_then(|s| s.to_str()).map(str::to_string))
            .collect()
    }

    #[test]
    fn accepts_configured_extensions_ignoring_case() {
        let settings = SelectionSettings::default();
        assert!(settings.accepts(Path::new("/tmp/a.mp3")));
        assert!(settings.accepts(Path::new("/tmp/a.MP3")));
        assert!(settings.accepts(Path::new("/tmp/a.flac")));
        assert!(!settings.accepts(Path::new("/tmp/a.txt")));
        assert!(!settings.accepts(Path::new("/tmp/a")));

        let dotted = SelectionSettings {
            extensions: vec![".Opus".into(), " ".into()],
            ..SelectionSettings::default()
        };
        assert!(dotted.accepts(Path::new("x.opus")));
        assert!(!dotted.accepts(Path::new("x.")));
    }

    #[test]
    fn expand_dir_filters_non_audio_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"x").unwrap();
        fs::write(dir.path().join("a.ogg"), b"x").unwrap();
        fs::write(dir.path().join("c.txt"), b"x").unwrap();

        let files = expand_dir(dir.path(), &SelectionSettings::default());
        assert_eq!(names(&files), vec!["a.ogg", "b.MP3"]);
    }

    #[test]
    fn expand_dir_skips_hidden_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"x").unwrap();

        let files = expand_dir(dir.path(), &SelectionSettings::default());
        assert_eq!(names(&files), vec!["visible.mp3"]);

        let settings = SelectionSettings {
            include_hidden: true,
            ..SelectionSettings::default()
        };
        assert_eq!(expand_dir(dir.path(), &settings).len(), 2);
    }

    #[test]
    fn expand_dir_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"x").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"x").unwrap();

        let settings = SelectionSettings {
            recursive: false,
            ..SelectionSettings::default()
        };
        assert_eq!(names(&expand_dir(dir.path(), &settings)), vec!["root.mp3"]);
    }

    #[test]
    fn expand_dir_respects_max_depth() {
        let dir = tempdir().unwrap();
        let d1 = dir.path().join("d1");
        let d2 = d1.join("d2");
        fs::create_dir_all(&d2).unwrap();
        fs::write(dir.path().join("root.mp3"), b"x").unwrap();
        fs::write(d1.join("one.mp3"), b"x").unwrap();
        fs::write(d2.join("two.mp3"), b"x").unwrap();

        let settings = SelectionSettings {
            max_depth: Some(2),
            ..SelectionSettings::default()
        };
        let found = names(&expand_dir(dir.path(), &settings));
        assert!(found.contains(&"root.mp3".to_string()));
        assert!(found.contains(&"one.mp3".to_string()));
        assert!(!found.contains(&"two.mp3".to_string()));
    }
}
