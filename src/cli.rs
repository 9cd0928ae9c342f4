use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use crate::media::ExtensionFilter;
use crate::relocate::RelocateOptions;
use crate::scanner::ScanOptions;

#[derive(Parser, Debug)]
#[command(name = "photo-mover")]
#[command(author, version, long_about = None)]
#[command(about = "Move photos/videos from source to destination, or list them as CSV")]
pub struct Args {
    /// Source directory
    #[arg(long, value_name = "DIR")]
    pub src: PathBuf,

    /// Destination directory
    #[arg(long, value_name = "DIR", required_unless_present = "csv", conflicts_with = "csv")]
    pub dst: Option<PathBuf>,

    /// Scan source recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Don't actually move files; show what would happen
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Comma-separated list of extensions to include (e.g. jpg,png,mp4)
    #[arg(short, long, value_name = "LIST")]
    pub extensions: Option<String>,

    /// Include every file regardless of extension
    #[arg(short, long, conflicts_with = "extensions")]
    pub all_files: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output file listing as CSV (does not move files)
    #[arg(long)]
    pub csv: bool,

    /// Include SHA256 hash column in CSV output
    #[arg(long)]
    pub csv_include_hash: bool,

    /// Write the CSV to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Reject report-only options given outside report mode.
    ///
    /// Runs after parsing and before anything touches the filesystem; the
    /// returned error exits with clap's usage status.
    pub fn validate(&self) -> Result<(), clap::Error> {
        if self.csv {
            return Ok(());
        }
        let flag = if self.csv_include_hash {
            "--csv-include-hash"
        } else if self.output.is_some() {
            "--output <FILE>"
        } else {
            return Ok(());
        };
        Err(Args::command().error(
            ErrorKind::MissingRequiredArgument,
            format!("{} can only be used together with --csv", flag),
        ))
    }

    pub fn filter(&self) -> ExtensionFilter {
        if self.all_files {
            return ExtensionFilter::Any;
        }
        match &self.extensions {
            Some(list) => ExtensionFilter::parse_list(list),
            None => ExtensionFilter::Media,
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            recursive: self.recursive,
            filter: self.filter(),
            include_hash: self.csv_include_hash,
        }
    }

    pub fn relocate_options(&self) -> RelocateOptions {
        RelocateOptions {
            recursive: self.recursive,
            dry_run: self.dry_run,
            filter: self.filter(),
        }
    }
}
