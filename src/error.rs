//! Error types shared by the walker, the actions and the CLI

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure that can abort a sweep run.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The directory walk itself failed (unreadable directory, stat failure).
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("cannot read metadata for '{}': {source}", .path.display())]
    Metadata { path: PathBuf, source: io::Error },

    #[error("failed to delete '{}': {source}", .path.display())]
    Delete { path: PathBuf, source: io::Error },

    #[error("archive destination '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot use archive destination '{}': {source}", .path.display())]
    ArchiveDestination { path: PathBuf, source: io::Error },

    /// Reading a source file or writing the tar/gzip layers failed.
    #[error("failed to archive '{}': {source}", .path.display())]
    Archive { path: PathBuf, source: io::Error },

    #[error("invalid ignore pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// Writing to the list output or the deletion log failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SweepError>;
