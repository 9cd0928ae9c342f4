//! Progress output for user-facing status updates.
//!
//! In verbose mode output is suppressed since tracing reports the same events.
//! In normal mode each move is echoed to stderr, colored when it is a terminal.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    colors_enabled: bool,
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Progress {
    /// Create a progress reporter on stderr; `verbose` silences it
    pub fn new(verbose: bool) -> Self {
        let colors_enabled = should_use_colors();
        if !colors_enabled {
            colored::control::set_override(false);
        }
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Create a reporter that prints nothing
    pub fn silent() -> Self {
        Self {
            writer: Box::new(io::sink()),
            silent: true,
            colors_enabled: false,
        }
    }

    /// Report the number of candidates found before moving starts
    pub fn move_start(&mut self, total: usize, dry_run: bool) {
        if self.silent {
            return;
        }
        let verb = if dry_run { "to check" } else { "to move" };
        let msg = format!("Found {} media files {}", total, verb);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.bold());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Report a single file: [current/total] from -> to
    pub fn move_progress(&mut self, current: usize, total: usize, from: &Path, to: &Path) {
        if self.silent {
            return;
        }
        let from = from.display().to_string();
        let to = to.display().to_string();
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} -> {}", current, total, from, to);
        }
    }

    /// Report an entry that could not be moved
    pub fn entry_skipped(&mut self, path: &Path, reason: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "!".yellow().bold(),
                format!("Skipped {}: {}", path.display(), reason).yellow()
            );
        } else {
            let _ = writeln!(self.writer, "! Skipped {}: {}", path.display(), reason);
        }
    }

    /// Report the end of a move run
    pub fn move_complete(&mut self, moved: usize, skipped: usize, dry_run: bool) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        let summary = if dry_run {
            format!("Dry run complete. {} files would be moved.", moved)
        } else {
            format!("Move complete. {} files moved.", moved)
        };
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), summary.green());
        } else {
            let _ = writeln!(self.writer, "{}", summary);
        }
        if skipped > 0 {
            let note = format!("{} files skipped because of errors.", skipped);
            if self.colors_enabled {
                let _ = writeln!(self.writer, "{}", note.yellow());
            } else {
                let _ = writeln!(self.writer, "{}", note);
            }
        }
    }

    /// Report where a manifest file was written
    pub fn manifest_written(&mut self, path: &Path, rows: usize) {
        if self.silent {
            return;
        }
        let msg = format!("Manifest with {} rows saved to: {}", rows, path.display());
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }
}
