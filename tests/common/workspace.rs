//! Temporary directory with helpers for writing inputs and reading outputs.

use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory that is removed when dropped.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Save an image; the format follows the file extension.
    pub fn write_image(&self, name: &str, image: &RgbImage) -> PathBuf {
        let path = self.join(name);
        image.save(&path).expect("Failed to write fixture image");
        path
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("Failed to read output")
    }

    /// Names of all entries directly in the workspace, sorted.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .expect("Failed to list workspace")
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
