use std::path::PathBuf;

use clap::Parser;

use crate::metadata::FormFields;

/// Convert an audio file to m4a when needed and write its tags.
#[derive(Parser, Debug)]
#[command(name = "tagvert", version, about)]
pub struct Args {
    /// Files or directories to select; only the first resolved file is saved.
    pub paths: Vec<PathBuf>,

    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = "")]
    pub artist: String,

    #[arg(long, default_value = "")]
    pub album: String,

    #[arg(long, default_value = "")]
    pub album_artist: String,

    #[arg(long, default_value = "")]
    pub genre: String,

    /// Release year; anything other than 1-4 digits is replaced by the configured fallback.
    #[arg(long, default_value = "")]
    pub year: String,

    /// Accepted but not written: the track is always stored as 1 of 1.
    #[arg(long, default_value = "")]
    pub track: String,

    /// Mark the track as explicit.
    #[arg(long)]
    pub explicit: bool,

    /// Directory below which converted files are written (default: current directory).
    #[arg(long, env = "TAGVERT_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    pub fn form_fields(&self) -> FormFields {
        FormFields {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            album_artist: self.album_artist.clone(),
            genre: self.genre.clone(),
            year: self.year.clone(),
            track: self.track.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_and_paths() {
        let args = Args::try_parse_from([
            "tagvert",
            "--title",
            "Song",
            "--album-artist",
            "Artist",
            "--year",
            "2020",
            "--track",
            "7",
            "--explicit",
            "a.mp3",
            "b.flac",
        ])
        .unwrap();

        assert_eq!(args.paths, vec![PathBuf::from("a.mp3"), PathBuf::from("b.flac")]);
        assert!(args.explicit);
        let fields = args.form_fields();
        assert_eq!(fields.title, "Song");
        assert_eq!(fields.album_artist, "Artist");
        assert_eq!(fields.year, "2020");
        assert_eq!(fields.track, "7");
        assert_eq!(fields.genre, "");
    }

    #[test]
    fn no_arguments_is_an_empty_selection() {
        let args = Args::try_parse_from(["tagvert"]).unwrap();
        assert!(args.paths.is_empty());
        assert!(!args.explicit);
        assert!(!args.print_config);
    }
}
