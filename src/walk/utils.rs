//! Name-based pruning of walked entries

use std::path::Path;

use glob::Pattern;

use crate::error::{Result, SweepError};

/// Compiled `--ignore` patterns, matched against the final path component.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| SweepError::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Check if a path should be pruned from the walk.
    pub fn should_ignore(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy(),
            None => return false,
        };

        self.patterns
            .iter()
            .any(|p| p.as_str() == name || p.matches(&name))
    }
}
