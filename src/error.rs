use std::path::PathBuf;

use crt_stripes::SettingsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    MissingDependency(String),

    #[error("cannot read image '{}': {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot write '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),
}

impl ConvertError {
    /// Stable name of the error kind, shown to the user ahead of the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::MissingDependency(_) => "MissingDependency",
            ConvertError::ImageDecode { .. } => "ImageDecodeError",
            ConvertError::FileSystem { .. } => "FileSystemError",
            ConvertError::InvalidSettings(_) => "InvalidSettings",
        }
    }

    /// Human-readable `"Kind: description"` line for the presentation layer.
    pub fn report(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Embedded default config is missing")]
    EmbeddedMissing,

    #[error("Invalid settings in config: {0}")]
    InvalidSettings(#[from] SettingsError),
}
