//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The tree is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    /// Add a file filled with `size` bytes.
    pub fn add_sized(&self, path: &str, size: usize) -> PathBuf {
        self.add_bytes(path, &vec![b'x'; size])
    }

    fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add a directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create `dir` holding `count` files named `file<N><ext>` per extension,
    /// each containing "dummy". Returns the directory path.
    pub fn populate(&self, dir: &str, files: &[(&str, usize)]) -> PathBuf {
        let root = self.add_dir(dir);
        for (ext, count) in files {
            for n in 1..=*count {
                fs::write(root.join(format!("file{}{}", n, ext)), "dummy")
                    .expect("Failed to write file");
            }
        }
        root
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Read every record of an archive bundle as (name, content), across all
/// gzip members appended to it.
pub fn read_bundle(path: &Path) -> Vec<(String, Vec<u8>)> {
    let file = File::open(path).expect("Failed to open bundle");
    let mut archive = tar::Archive::new(MultiGzDecoder::new(file));
    archive.set_ignore_zeros(true);

    let mut records = Vec::new();
    for entry in archive.entries().expect("Failed to read bundle") {
        let mut entry = entry.expect("Failed to read bundle entry");
        let name = entry
            .path()
            .expect("Invalid entry path")
            .to_string_lossy()
            .to_string();
        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .expect("Failed to read entry content");
        records.push((name, content));
    }
    records
}
