//! Traversal driver: walk, filter, dispatch

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ignore::{Walk, WalkBuilder};

use crate::error::{Result, SweepError};

use super::action::{Action, Dispatcher, Outcome};
use super::archive::resolved_bundle_path;
use super::config::SweepConfig;
use super::filter::{FileEntry, matches};
use super::utils::IgnoreSet;

/// Counts gathered during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-directory entries seen by the walk, matching or not
    pub files_visited: usize,
    pub files_matched: usize,
    pub bytes_matched: u64,
    pub listed: usize,
    pub archived: usize,
    pub deleted: usize,
    /// Bundle written by the archive action, if any file was archived
    pub bundle: Option<PathBuf>,
}

impl RunSummary {
    fn record(&mut self, outcome: Outcome, size: u64) {
        self.files_matched += 1;
        self.bytes_matched += size;
        match outcome {
            Outcome::Listed => self.listed += 1,
            Outcome::Archived => self.archived += 1,
            Outcome::Deleted => self.deleted += 1,
            Outcome::NoAction => {}
        }
    }
}

/// Build the depth-first, name-sorted walk over `root`.
///
/// Hidden files are always visited. Ignore files are only honoured when
/// `respect_gitignore` is set.
pub fn build_walk(root: &Path, config: &SweepConfig) -> Result<Walk> {
    let ignore_set = IgnoreSet::new(&config.ignore_patterns)?;

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .max_depth(config.max_depth)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| !ignore_set.should_ignore(entry.path()));

    if config.respect_gitignore {
        builder
            .parents(true)
            .ignore(true)
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false);
    }

    Ok(builder.build())
}

/// Walk `root`, filter every non-directory entry and apply the configured action.
///
/// List output goes to `out`, deletion records to `deletion_log`. The first
/// error stops the walk; changes already made stay in place.
pub fn run<O: Write, L: Write>(
    root: &Path,
    out: &mut O,
    deletion_log: &mut L,
    config: &SweepConfig,
) -> Result<RunSummary> {
    let action = Action::select(config);
    if config.active_actions() > 1 {
        log::debug!(
            "{} actions requested, running {}",
            config.active_actions(),
            action.name()
        );
    }

    // The bundle may sit inside the tree being walked; it is never an input.
    let bundle = match &action {
        Action::Archive(dir) => resolved_bundle_path(dir, root),
        _ => None,
    };

    let walk = build_walk(root, config)?;
    let mut dispatcher = Dispatcher::new(action, root, out, deletion_log);
    let mut summary = RunSummary::default();

    match walk_entries(walk, config, bundle.as_deref(), &mut dispatcher, &mut summary) {
        Ok(()) => {
            summary.bundle = dispatcher.finish()?;
            log::debug!(
                "visited {} files, {} matched",
                summary.files_visited,
                summary.files_matched
            );
            Ok(summary)
        }
        Err(e) => {
            // Close the bundle so entries written so far stay readable.
            if let Err(close_err) = dispatcher.finish() {
                log::warn!("failed to close archive after error: {}", close_err);
            }
            Err(e)
        }
    }
}

fn walk_entries(
    walk: Walk,
    config: &SweepConfig,
    bundle: Option<&Path>,
    dispatcher: &mut Dispatcher<'_>,
    summary: &mut RunSummary,
) -> Result<()> {
    for result in walk {
        let dent = result?;
        let Some(file_type) = dent.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            continue;
        }

        let path = dent.path();
        if bundle.is_some_and(|b| is_bundle(path, b)) {
            log::debug!("skipping archive bundle {}", path.display());
            continue;
        }

        // Symlinks are entries in their own right and are never followed.
        let meta = fs::symlink_metadata(path).map_err(|source| SweepError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
        let entry = FileEntry::new(path, false, meta.len());
        summary.files_visited += 1;

        if !matches(&entry, &config.extension, config.min_size) {
            continue;
        }

        let outcome = dispatcher.dispatch(&entry)?;
        summary.record(outcome, entry.size);
    }
    Ok(())
}

/// True when `path` names the resolved bundle file.
fn is_bundle(path: &Path, bundle: &Path) -> bool {
    if path.file_name() != bundle.file_name() {
        return false;
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), bundle.parent()) {
        (Ok(dir), Some(bundle_dir)) => dir == bundle_dir,
        _ => false,
    }
}
