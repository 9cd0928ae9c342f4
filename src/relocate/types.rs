use std::path::PathBuf;

use crate::media::ExtensionFilter;

/// Options for a relocation run
#[derive(Debug, Clone, Default)]
pub struct RelocateOptions {
    /// Descend into subdirectories of the source
    pub recursive: bool,
    /// Report what would happen without touching the filesystem
    pub dry_run: bool,
    /// Which extensions count as media
    pub filter: ExtensionFilter,
}

/// A single file move, performed or planned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Where the file was found
    pub source: PathBuf,
    /// Destination root joined with the file's base name
    pub destination: PathBuf,
}

/// An entry that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome for one candidate entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocateOutcome {
    Moved(Relocation),
    Skipped(SkippedEntry),
}

/// Result of a relocation batch
#[derive(Debug, Clone)]
pub struct RelocateResult {
    /// Whether this was a dry run
    pub dry_run: bool,
    /// Moves performed (or planned, in a dry run), in processing order
    pub relocations: Vec<Relocation>,
    /// Entries that failed and were left in place
    pub skipped: Vec<SkippedEntry>,
}

impl RelocateResult {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            relocations: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: RelocateOutcome) {
        match outcome {
            RelocateOutcome::Moved(relocation) => self.relocations.push(relocation),
            RelocateOutcome::Skipped(entry) => self.skipped.push(entry),
        }
    }

    /// Destination paths in the order they were produced
    pub fn destinations(&self) -> impl Iterator<Item = &PathBuf> + '_ {
        self.relocations.iter().map(|r| &r.destination)
    }

    pub fn is_empty(&self) -> bool {
        self.relocations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.relocations.len()
    }
}
