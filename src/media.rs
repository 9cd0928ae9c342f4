//! Media classification by file extension.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Extensions treated as media when no explicit list is given
pub const DEFAULT_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "heic", "mp4", "mov", "avi", "gif"];

/// Which file extensions count as media
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExtensionFilter {
    /// The built-in photo/video set ([`DEFAULT_EXTENSIONS`])
    #[default]
    Media,
    /// A custom, normalized set. An empty set matches nothing.
    Only(BTreeSet<String>),
    /// Every regular file, whatever its extension
    Any,
}

impl ExtensionFilter {
    /// Build a custom filter, normalizing each item (trimmed, leading `.` removed, lower-cased)
    pub fn from_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = items
            .into_iter()
            .map(|item| normalize_extension(item.as_ref()))
            .collect();
        ExtensionFilter::Only(set)
    }

    /// Parse a comma-separated list such as `jpg, .PNG,mp4`.
    ///
    /// Empty items are dropped, so `","` yields a filter that matches nothing.
    pub fn parse_list(value: &str) -> Self {
        Self::from_list(value.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    /// Check a single extension (with or without its leading `.`)
    pub fn matches(&self, extension: &str) -> bool {
        match self {
            ExtensionFilter::Any => true,
            ExtensionFilter::Media => {
                let ext = normalize_extension(extension);
                DEFAULT_EXTENSIONS.contains(&ext.as_str())
            }
            ExtensionFilter::Only(set) => set.contains(&normalize_extension(extension)),
        }
    }

    /// Short human-readable description for logs
    pub fn describe(&self) -> String {
        match self {
            ExtensionFilter::Any => "all files".to_string(),
            ExtensionFilter::Media => DEFAULT_EXTENSIONS.join(","),
            ExtensionFilter::Only(set) if set.is_empty() => "(none)".to_string(),
            ExtensionFilter::Only(set) => set.iter().cloned().collect::<Vec<_>>().join(","),
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Lower-cased extension of a path's base name, or an empty string if it has none
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Whether `path` is a regular file whose extension passes `filter`.
///
/// Symlinks are followed, so a link to a file counts and a link to a
/// directory does not. Missing or unreadable entries are not media.
pub fn is_media(path: &Path, filter: &ExtensionFilter) -> bool {
    if !filter.matches(&extension_of(path)) {
        return false;
    }

    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
