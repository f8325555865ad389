//! Action selection and dispatch for matching files

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SweepError};

use super::archive::Archiver;
use super::config::SweepConfig;
use super::filter::FileEntry;

/// The one action a run applies to every matching file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the path to the output sink.
    List,
    /// Copy the file into the bundle under this directory.
    Archive(PathBuf),
    /// Remove the file and record it in the deletion log.
    Delete,
    /// Match only; nothing happens.
    Inspect,
}

impl Action {
    /// Pick the action for a run: list, then archive, then delete.
    pub fn select(config: &SweepConfig) -> Self {
        if config.list {
            Action::List
        } else if let Some(dir) = &config.archive_dir {
            Action::Archive(dir.clone())
        } else if config.delete {
            Action::Delete
        } else {
            Action::Inspect
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Archive(_) => "archive",
            Action::Delete => "delete",
            Action::Inspect => "inspect",
        }
    }
}

/// What happened to one matching entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Listed,
    Archived,
    Deleted,
    NoAction,
}

/// Remove a single file.
pub fn delete_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|source| SweepError::Delete {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies the selected action to matching entries and owns the sinks for one run.
///
/// The archive bundle is opened on the first archived entry and closed by
/// `finish`.
pub struct Dispatcher<'a> {
    action: Action,
    root: &'a Path,
    out: &'a mut dyn Write,
    deletion_log: &'a mut dyn Write,
    archiver: Option<Archiver>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        action: Action,
        root: &'a Path,
        out: &'a mut dyn Write,
        deletion_log: &'a mut dyn Write,
    ) -> Self {
        Self {
            action,
            root,
            out,
            deletion_log,
            archiver: None,
        }
    }

    /// Apply the action to an entry that already passed the filter.
    pub fn dispatch(&mut self, entry: &FileEntry) -> Result<Outcome> {
        match &self.action {
            Action::List => {
                writeln!(self.out, "{}", entry.path.display()).map_err(SweepError::Output)?;
                Ok(Outcome::Listed)
            }
            Action::Archive(dir) => {
                let archiver = match self.archiver.take() {
                    Some(a) => a,
                    None => Archiver::open(dir, self.root)?,
                };
                self.archiver.insert(archiver).archive(self.root, entry)?;
                Ok(Outcome::Archived)
            }
            Action::Delete => {
                delete_file(&entry.path)?;
                log::info!("deleted {}", entry.path.display());
                writeln!(self.deletion_log, "{}", entry.path.display())
                    .map_err(SweepError::Output)?;
                Ok(Outcome::Deleted)
            }
            Action::Inspect => Ok(Outcome::NoAction),
        }
    }

    /// Close the archive bundle, if one was opened, and flush the sinks.
    ///
    /// Returns the bundle path when a bundle was written.
    pub fn finish(self) -> Result<Option<PathBuf>> {
        let bundle = match self.archiver {
            Some(archiver) => Some(archiver.finish()?),
            None => None,
        };
        self.out.flush().map_err(SweepError::Output)?;
        self.deletion_log.flush().map_err(SweepError::Output)?;
        Ok(bundle)
    }
}
