use std::fs;
use std::path::{Path, PathBuf};
use std::vec;
use thiserror::Error;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::hasher::sha256_file;
use crate::media::{extension_of, is_media, ExtensionFilter};

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Source not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What to look for during a scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Which extensions count as media
    pub filter: ExtensionFilter,
    /// Compute a SHA-256 of every matching file
    pub include_hash: bool,
}

/// A media file found by [`scan_media`].
///
/// Names are carried as UTF-8 text for the manifest. A file name or path that
/// is not valid UTF-8 is rendered lossily, each invalid sequence becoming
/// U+FFFD, and a warning is logged for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Base name including extension
    pub filename: String,
    /// Lower-cased extension without the leading dot, empty if none
    pub extension: String,
    /// Path from the scan root, rendered with the host separator
    pub relative_path: String,
    pub size_bytes: u64,
    /// Lowercase hex SHA-256, only when hashing was requested
    pub content_hash: Option<String>,
}

/// Walker shared by the scanner and the relocator.
///
/// Without `recursive` only the direct children of `root` are visited.
/// The root itself is never yielded and symlinked directories are not entered.
pub fn walker(root: &Path, recursive: bool) -> WalkDir {
    let walk = WalkDir::new(root).min_depth(1).follow_links(false);
    if recursive {
        walk
    } else {
        walk.max_depth(1)
    }
}

/// Fail early when the source root is unusable
pub(crate) fn check_root(root: &Path) -> Result<(), ScannerError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScannerError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ScannerError::PathNotFound(root.to_path_buf()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ScannerError::PermissionDenied(root.to_path_buf()))
        }
        Err(e) => Err(ScannerError::Read {
            path: root.to_path_buf(),
            source: e,
        }),
    }
}

/// Scan `root` for media files.
///
/// The directory is walked up front and every visited path is sorted by its
/// full path bytes, so output order is reproducible. Sizes and hashes are
/// read lazily as the returned iterator is consumed.
pub fn scan_media(root: &Path, options: &ScanOptions) -> Result<MediaScan, ScannerError> {
    debug!(path = ?root, recursive = options.recursive, "Scanning for media");

    check_root(root)?;

    let mut paths = Vec::new();
    for entry in walker(root, options.recursive) {
        let entry = entry?;
        trace!(entry = ?entry.path(), "Visited entry");
        paths.push(entry.into_path());
    }

    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    debug!(count = paths.len(), filter = %options.filter.describe(), "Walk complete");

    Ok(MediaScan {
        root: root.to_path_buf(),
        paths: paths.into_iter(),
        filter: options.filter.clone(),
        include_hash: options.include_hash,
    })
}

/// Forward-only sequence of [`FileRecord`]s produced by [`scan_media`].
///
/// An `Err` item means the scan failed for that entry; callers stop there
/// rather than emit a partial manifest.
#[derive(Debug)]
pub struct MediaScan {
    root: PathBuf,
    paths: vec::IntoIter<PathBuf>,
    filter: ExtensionFilter,
    include_hash: bool,
}

impl MediaScan {
    fn record_for(&self, path: &Path) -> Result<FileRecord, ScannerError> {
        let read_err = |source: std::io::Error| ScannerError::Read {
            path: path.to_path_buf(),
            source,
        };

        let size_bytes = fs::metadata(path).map_err(read_err)?.len();
        let content_hash = if self.include_hash {
            trace!(path = ?path, "Hashing");
            Some(sha256_file(path).map_err(read_err)?)
        } else {
            None
        };

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if relative.to_str().is_none() {
            warn!("Name is not valid UTF-8, listing it as {:?}", relative.to_string_lossy());
        }
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(FileRecord {
            extension: extension_of(path),
            relative_path: relative.to_string_lossy().into_owned(),
            filename,
            size_bytes,
            content_hash,
        })
    }
}

impl Iterator for MediaScan {
    type Item = Result<FileRecord, ScannerError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = self.paths.next()?;
            if !is_media(&path, &self.filter) {
                trace!(path = ?path, "Skipping non-media entry");
                continue;
            }
            debug!(path = ?path, "Found media file");
            return Some(self.record_for(&path));
        }
    }
}
