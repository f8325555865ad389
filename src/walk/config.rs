//! Configuration for a single sweep run

use std::path::PathBuf;

/// Configuration for one walk over a directory tree.
///
/// Built once by the caller and shared immutably by the walker, the filter and
/// the action dispatcher.
#[derive(Debug, Clone, Default)]
pub struct SweepConfig {
    /// Exact extension to match, including the leading dot (e.g. ".log").
    /// Empty matches every extension.
    pub extension: String,
    /// Files must be strictly larger than this many bytes. 0 disables the check.
    pub min_size: u64,
    pub list: bool,
    pub delete: bool,
    /// Directory receiving the archive bundle. `None` disables archiving.
    pub archive_dir: Option<PathBuf>,
    pub max_depth: Option<usize>,
    /// Glob patterns matched against entry names; matches are pruned from the walk.
    pub ignore_patterns: Vec<String>,
    /// Honour .gitignore, .ignore and git exclude files while walking
    pub respect_gitignore: bool,
}

impl SweepConfig {
    /// Number of action flags that are switched on.
    ///
    /// More than one is allowed; the dispatcher picks list, then archive, then
    /// delete.
    pub fn active_actions(&self) -> usize {
        [self.list, self.archive_dir.is_some(), self.delete]
            .iter()
            .filter(|on| **on)
            .count()
    }

    /// True when the run can modify the filesystem.
    pub fn is_mutating(&self) -> bool {
        !self.list && (self.archive_dir.is_some() || self.delete)
    }
}
