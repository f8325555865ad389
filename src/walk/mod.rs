//! Directory walking: filter files and apply one action to each match
//!
//! - `filter`: pure extension/size predicate
//! - `action`: fixed-priority action selection and dispatch (list, archive, delete)
//! - `archive`: gzip-compressed tar bundle writer
//! - `walker`: the traversal driver tying them together

mod action;
mod archive;
mod config;
mod filter;
mod utils;
mod walker;

pub use action::{Action, Dispatcher, Outcome, delete_file};
pub use archive::{Archiver, BUNDLE_SUFFIX, bundle_path, relative_name};
pub use config::SweepConfig;
pub use filter::{FileEntry, extension_of, matches, normalize_extension};
pub use utils::IgnoreSet;
pub use walker::{RunSummary, build_walk, run};
