//! CSV manifest of scanned media files.
//!
//! The format is fixed: a header row followed by one row per [`FileRecord`],
//! comma separated, `\n` terminated, UTF-8. Fields containing a comma, quote
//! or line break are quoted with embedded quotes doubled.

mod reader;
mod writer;

pub use reader::read_manifest;
pub use writer::{write_manifest, write_manifest_file, ManifestWriter};

/// Columns present in every manifest
pub const MANIFEST_COLUMNS: [&str; 4] = ["filename", "extension", "relative_path", "size_bytes"];

/// Extra column appended when hashes are requested
pub const HASH_COLUMN: &str = "sha256";

/// Error types for manifest operations
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to write manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected manifest header: {found}")]
    InvalidHeader { found: String },

    #[error("Malformed manifest row {line}: {message}")]
    MalformedRow { line: usize, message: String },
}

#[cfg(test)]
pub(crate) fn sample_record(name: &str, relative: &str, size: u64) -> crate::scanner::FileRecord {
    crate::scanner::FileRecord {
        filename: name.to_string(),
        extension: crate::media::extension_of(std::path::Path::new(name)),
        relative_path: relative.to_string(),
        size_bytes: size,
        content_hash: None,
    }
}
