pub mod cli;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod manifest;
pub mod media;
pub mod output;
pub mod progress;
pub mod relocate;
pub mod scanner;

pub use error::{AppError, ExitCode};
pub use hasher::{sha256_file, sha256_reader};
pub use manifest::{read_manifest, write_manifest, write_manifest_file, ManifestError, ManifestWriter};
pub use media::{is_media, ExtensionFilter, DEFAULT_EXTENSIONS};
pub use relocate::{
    move_file, relocate, RelocateError, RelocateOptions, RelocateOutcome, RelocateResult,
    Relocation, SkippedEntry,
};
pub use scanner::{scan_media, FileRecord, MediaScan, ScanOptions, ScannerError};
