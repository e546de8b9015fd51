//! Shared test utilities for the `ignores` workspace.
//!
//! [`OutputDir`] builds a throwaway generator output directory with an ignore
//! file and any number of pre-existing files, removed again on drop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary output directory for on-disk ignore file tests.
#[derive(Debug)]
pub struct OutputDir {
    dir: TempDir,
}

impl OutputDir {
    /// Creates an empty temporary directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Creates a directory whose `file_name` holds `contents`.
    pub fn with_ignore_file(file_name: &str, contents: impl AsRef<[u8]>) -> io::Result<Self> {
        let output = Self::new()?;
        output.write(file_name, contents)?;
        Ok(output)
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns `relative` joined onto the directory.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> io::Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Creates `relative` and all of its parents as directories.
    pub fn mkdir(&self, relative: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = self.join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }
}
