use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, Environment, File};

use super::schema::Settings;
use crate::metadata::is_valid_year;

const ENV_PREFIX: &str = "TAGVERT";
const CONFIG_PATH_VAR: &str = "TAGVERT_CONFIG_PATH";

impl Settings {
    /// Load the config file found by [`config_path`], with
    /// `TAGVERT__SECTION__KEY` variables taking precedence over it.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_path(|key| env::var_os(key)).as_deref())
    }

    /// Load from `file` (skipped when absent) plus the environment.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        let t = &self.transcode;
        let required = [
            ("transcode.encoder", t.encoder.as_str()),
            ("transcode.codec", t.codec.as_str()),
            ("transcode.bitrate", t.bitrate.as_str()),
            (
                "transcode.target_extension",
                t.target_extension.trim().trim_start_matches('.'),
            ),
            ("transcode.output_dir", t.output_dir.as_str()),
        ];
        if let Some((key, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(format!("{key} must not be empty"));
        }
        if t.poll_interval_ms == 0 {
            return Err("transcode.poll_interval_ms must be >= 1".to_string());
        }
        if !is_valid_year(&self.tagging.fallback_year) {
            return Err(format!(
                "tagging.fallback_year must be a year or YYYY-MM[-DD] date, got {:?}",
                self.tagging.fallback_year
            ));
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// `$TAGVERT_CONFIG_PATH`, else `tagvert/config.toml` under `$XDG_CONFIG_HOME`
/// or `$HOME/.config`. `var` looks up an environment variable.
pub(super) fn config_path(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    if let Some(explicit) = var(CONFIG_PATH_VAR) {
        return Some(explicit.into());
    }
    var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| var("HOME").map(|home| Path::new(&home).join(".config")))
        .map(|base| base.join("tagvert").join("config.toml"))
}
