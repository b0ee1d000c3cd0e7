//! Errors raised while reading or checking engine settings.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A settings file exists but could not be read.
    #[error("cannot read alfa settings from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("alfa settings in {path} are not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A setting holds a value the engine cannot run with.
    #[error("invalid setting `{setting}`: {reason}")]
    InvalidSetting {
        setting: &'static str,
        reason: String,
    },

    #[error("no per-user configuration directory on this platform")]
    NoUserConfigDir,
}
