use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tagvert/config.toml` or `~/.config/tagvert/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TAGVERT__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub transcode: TranscodeSettings,
    pub tagging: TaggingSettings,
    pub selection: SelectionSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TranscodeSettings {
    /// Encoder executable, looked up on `PATH` unless absolute.
    pub encoder: String,
    /// Audio codec passed as `-c:a`.
    pub codec: String,
    /// Audio bitrate passed as `-b:a`.
    pub bitrate: String,
    /// Extension of the target container (without dot). Files already
    /// carrying it are tagged in place.
    pub target_extension: String,
    /// Directory, relative to the working directory, receiving converted files.
    pub output_dir: String,
    /// Pass `-strict experimental` to the encoder.
    pub strict_experimental: bool,
    /// Pass `-y` so an existing converted file is regenerated without prompting.
    pub overwrite: bool,
    /// How often a running encoder is checked for exit or cancellation (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            encoder: "ffmpeg".to_string(),
            codec: "aac".to_string(),
            bitrate: "320k".to_string(),
            target_extension: "m4a".to_string(),
            output_dir: "conv".to_string(),
            strict_experimental: true,
            overwrite: true,
            poll_interval_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TaggingSettings {
    /// Year written when the supplied year cannot be used.
    pub fallback_year: String,
}

impl Default for TaggingSettings {
    fn default() -> Self {
        Self {
            fallback_year: "2023".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// File extensions picked up when a directory is selected
    /// (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while expanding directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
                "opus".into(),
                "aiff".into(),
                "m4a".into(),
            ],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    ///
    /// Example: "info" or "tagvert=debug"
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
