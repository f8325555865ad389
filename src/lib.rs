//! Sweep - walk a directory tree and list, delete or archive matching files

pub mod error;
pub mod size;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Result, SweepError};
pub use size::{format_size, parse_size};
pub use walk::{Action, FileEntry, Outcome, RunSummary, SweepConfig, matches, run};
