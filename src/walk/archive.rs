//! Archive bundle writer: one gzip-compressed tar stream per run
//!
//! The bundle lives at `<destination>/<root name>.gz` and is opened for
//! appending, so every run adds a new gzip member holding its own tar stream.
//! Readers need a multi-member gzip decoder and must skip the tar end-of-archive
//! blocks between runs (`tar::Archive::set_ignore_zeros`).

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::Builder;

use crate::error::{Result, SweepError};

use super::filter::FileEntry;

/// Suffix appended to the root's base name to form the bundle file name.
pub const BUNDLE_SUFFIX: &str = ".gz";

/// Location of the bundle for `root` inside `destination`.
///
/// The root is canonicalized first so that "." or "dir/.." still yield a real
/// directory name. Roots with the same base name share a bundle.
pub fn bundle_path(destination: &Path, root: &Path) -> Result<PathBuf> {
    let canonical = root.canonicalize().map_err(|source| SweepError::Metadata {
        path: root.to_path_buf(),
        source,
    })?;
    let name = canonical
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "root".to_string());
    Ok(destination.join(format!("{}{}", name, BUNDLE_SUFFIX)))
}

/// Canonical location of the bundle, or `None` when the destination cannot be
/// resolved (it does not exist yet, so no bundle can be inside the walk).
pub fn resolved_bundle_path(destination: &Path, root: &Path) -> Option<PathBuf> {
    let bundle = bundle_path(destination, root).ok()?;
    let name = bundle.file_name()?;
    Some(destination.canonicalize().ok()?.join(name))
}

/// Name recorded in the tar header: the path relative to the walk root.
///
/// When the root is the file itself the bare file name is used.
pub fn relative_name(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf()),
    }
}

/// An open bundle accepting archived files until `finish` is called.
pub struct Archiver {
    bundle: PathBuf,
    builder: Builder<GzEncoder<File>>,
    entries: usize,
}

impl Archiver {
    /// Open (or create) the bundle for `root` inside `destination`.
    pub fn open(destination: &Path, root: &Path) -> Result<Self> {
        let meta = fs::metadata(destination).map_err(|source| SweepError::ArchiveDestination {
            path: destination.to_path_buf(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(SweepError::NotADirectory(destination.to_path_buf()));
        }

        let bundle = bundle_path(destination, root)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&bundle)
            .map_err(|source| SweepError::ArchiveDestination {
                path: bundle.clone(),
                source,
            })?;
        log::info!("archiving into {}", bundle.display());

        // Symlinks are stored as links, matching how the walk treats them.
        let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
        builder.follow_symlinks(false);

        Ok(Self {
            bundle,
            builder,
            entries: 0,
        })
    }

    /// Append one file with its metadata and full content.
    pub fn archive(&mut self, root: &Path, entry: &FileEntry) -> Result<()> {
        let name = relative_name(root, &entry.path);
        self.builder
            .append_path_with_name(&entry.path, &name)
            .map_err(|source| SweepError::Archive {
                path: entry.path.clone(),
                source,
            })?;
        self.entries += 1;
        log::debug!("archived {} as {}", entry.path.display(), name.display());
        Ok(())
    }

    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Finish the tar layer, then the gzip layer, and flush the file.
    pub fn finish(self) -> Result<PathBuf> {
        let Self {
            bundle, builder, ..
        } = self;
        let wrap = |source: io::Error| SweepError::Archive {
            path: bundle.clone(),
            source,
        };
        let encoder = builder.into_inner().map_err(wrap)?;
        let mut file = encoder.finish().map_err(wrap)?;
        file.flush().map_err(wrap)?;
        Ok(bundle)
    }
}
