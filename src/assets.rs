//! Embedded default configuration
//!
//! The default `config.yaml` is compiled into the binary. It is used when no
//! config file is given and is what `scanline init` writes to disk.
//!
//! - If no path is given: use the embedded config (no filesystem access)
//! - If a path is given: it must exist, there is no silent fallback

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const CONFIG_NAME: &str = "config.yaml";

/// Where `init` writes when no path is given.
pub const DEFAULT_INIT_PATH: &str = "./scanline.yaml";

/// Report of the init (extraction) operation
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Raw bytes of the embedded default config.
pub fn embedded_config() -> io::Result<Cow<'static, [u8]>> {
    EmbeddedConfig::get(CONFIG_NAME)
        .map(|f| {
            tracing::trace!("Loading config from embedded assets");
            f.data
        })
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found"))
}

/// Embedded default config as a UTF-8 string
pub fn embedded_config_string() -> io::Result<String> {
    let bytes = embedded_config()?;
    String::from_utf8(bytes.into_owned()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Read a config file from disk as a UTF-8 string.
pub fn read_config_file(path: &Path) -> io::Result<String> {
    tracing::trace!(path = %path.display(), "Loading config from filesystem");
    fs::read_to_string(path)
}

/// Write the embedded default config to `path` (init command).
///
/// An existing file is left alone unless `force` is set.
pub fn init_config(path: Option<&Path>, force: bool) -> io::Result<InitReport> {
    let mut report = InitReport::default();
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INIT_PATH));

    if !force && path.exists() {
        report.skipped.push(path.display().to_string());
        return Ok(report);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let data = embedded_config()?;
    fs::write(&path, &*data)?;
    tracing::info!(path = %path.display(), "Wrote default config");
    report.written.push(path.display().to_string());

    Ok(report)
}
