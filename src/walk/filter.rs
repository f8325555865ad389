//! Extension and size filtering for walked entries

use std::path::{Path, PathBuf};

/// A single entry produced by the walk, alive for one filter + action evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
    /// Everything from the last '.' of the file name, or empty.
    pub extension: String,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, is_dir: bool, size: u64) -> Self {
        let path = path.into();
        let extension = extension_of(&path);
        Self {
            path,
            is_dir,
            size,
            extension,
        }
    }
}

/// Extension of the final path component, leading dot included.
///
/// Dot files count as all-extension (".bashrc" -> ".bashrc").
pub fn extension_of(path: &Path) -> String {
    let name = match path.file_name() {
        Some(n) => n.to_string_lossy(),
        None => return String::new(),
    };
    match name.rfind('.') {
        Some(idx) => name[idx..].to_string(),
        None => String::new(),
    }
}

/// Normalize a user-supplied extension so it carries a leading dot.
///
/// Case is preserved: matching is case-sensitive.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.is_empty() || ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

/// Decide whether an entry is selected for an action.
///
/// Directories never match. A non-empty `extension` must equal the entry's
/// extension exactly, and a non-zero `min_size` must be strictly exceeded.
pub fn matches(entry: &FileEntry, extension: &str, min_size: u64) -> bool {
    if entry.is_dir {
        return false;
    }
    if !extension.is_empty() && entry.extension != extension {
        return false;
    }
    if min_size > 0 && entry.size <= min_size {
        return false;
    }
    true
}
