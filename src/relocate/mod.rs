mod types;

pub use types::{RelocateOptions, RelocateOutcome, RelocateResult, Relocation, SkippedEntry};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::media::is_media;
use crate::progress::Progress;
use crate::scanner::{check_root, walker, ScannerError};

/// Errors that abort a whole relocation run
#[derive(Error, Debug)]
pub enum RelocateError {
    #[error(transparent)]
    Source(#[from] ScannerError),

    #[error("Cannot create destination {path}: {source}")]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Move media files from `source` into `destination`, flattening the tree.
///
/// Every match lands at `destination/<file name>`, so same-named files from
/// different subdirectories overwrite each other. A dry run touches nothing,
/// not even the destination root. Failures on individual files are logged
/// and collected in [`RelocateResult::skipped`]; only an unusable source or
/// destination root aborts the run.
pub fn relocate(
    source: &Path,
    destination: &Path,
    options: &RelocateOptions,
    progress: &mut Progress,
) -> Result<RelocateResult, RelocateError> {
    check_root(source)?;

    if !options.dry_run {
        fs::create_dir_all(destination).map_err(|e| RelocateError::DestinationUnavailable {
            path: destination.to_path_buf(),
            source: e,
        })?;
    }

    let mut result = RelocateResult::new(options.dry_run);

    // Collect before moving anything so a destination nested inside the
    // source never feeds files back into the walk
    let mut candidates = Vec::new();
    for entry in walker(source, options.recursive) {
        match entry {
            Ok(entry) => {
                let path = entry.into_path();
                if is_media(&path, &options.filter) {
                    candidates.push(path);
                }
            }
            Err(e) => {
                let path = e.path().unwrap_or(source).to_path_buf();
                result.record(skip(path, e.to_string(), progress));
            }
        }
    }
    candidates.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    let total = candidates.len();
    debug!(count = total, filter = %options.filter.describe(), "Relocation candidates collected");
    progress.move_start(total, options.dry_run);

    for (i, path) in candidates.into_iter().enumerate() {
        let outcome = match relocate_entry(&path, destination, options.dry_run) {
            Ok(relocation) => {
                progress.move_progress(i + 1, total, &relocation.source, &relocation.destination);
                RelocateOutcome::Moved(relocation)
            }
            Err(e) => skip(path, e.to_string(), progress),
        };
        result.record(outcome);
    }

    progress.move_complete(result.len(), result.skipped.len(), options.dry_run);

    Ok(result)
}

fn skip(path: PathBuf, reason: String, progress: &mut Progress) -> RelocateOutcome {
    warn!("Error processing {:?}: {}", path, reason);
    progress.entry_skipped(&path, &reason);
    RelocateOutcome::Skipped(SkippedEntry { path, reason })
}

fn relocate_entry(path: &Path, destination: &Path, dry_run: bool) -> io::Result<Relocation> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let target = destination.join(name);

    if dry_run {
        info!("DRY RUN: move {:?} -> {:?}", path, target);
    } else {
        info!("Moving {:?} -> {:?}", path, target);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        move_file(path, &target)?;
    }

    Ok(Relocation {
        source: path.to_path_buf(),
        destination: target,
    })
}

/// Move a file, replacing anything already at `to`.
///
/// Tries a rename first. Only when the rename fails because `from` and `to`
/// sit on different filesystems is the file copied instead; every other
/// rename error is returned untouched.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            debug!(error = %e, "Rename crosses filesystems, copying instead");
            copy_then_remove(from, to)
        }
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(windows)]
fn is_cross_device(err: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    err.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_err: &io::Error) -> bool {
    false
}

/// Copy `from` next to `to`, remove `from`, then rename the copy over `to`.
///
/// `to` is only replaced once the original is gone, so a failure at any
/// step leaves existing destination content as it was.
pub(crate) fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    let dir = match to.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let staged = NamedTempFile::new_in(dir)?;
    fs::copy(from, staged.path())?;
    fs::remove_file(from)?;

    staged.persist(to).map_err(|e| {
        // The original is gone; keep the copy rather than lose the data
        let error = e.error;
        match e.file.keep() {
            Ok((_, kept)) => warn!("Could not place {:?}, content kept at {:?}", to, kept),
            Err(keep_err) => warn!("Could not keep staged copy for {:?}: {}", to, keep_err),
        }
        error
    })?;

    Ok(())
}
