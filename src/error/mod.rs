mod codes;

pub use codes::ExitCode;

use crate::manifest::ManifestError;
use crate::relocate::RelocateError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Scan failed: {message}")]
    ScanFailed {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Manifest error: {0}")]
    Manifest(ManifestError),

    #[error("Destination unavailable: {path}")]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::SourceNotFound { .. } => ExitCode::SourceNotFound,
            AppError::NotADirectory { .. } => ExitCode::SourceNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::ScanFailed { .. } => ExitCode::ScanError,
            AppError::Manifest(_) => ExitCode::ManifestError,
            AppError::DestinationUnavailable { .. } => ExitCode::DestinationError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::SourceNotFound { path } => {
                format!(
                    "The source directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The source path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::ScanFailed { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Scan aborted, no complete manifest was produced:\n  {}\n{}\n\
                     Check that the files are readable and are not being modified.",
                    message, path_info
                )
            }

            AppError::Manifest(err) => {
                format!(
                    "Failed to write the manifest:\n  {}\n\n\
                     Check that the output location is writable.",
                    err
                )
            }

            AppError::DestinationUnavailable { path, source } => {
                format!(
                    "Cannot create the destination directory:\n  {}\n\
                     Error: {}\n\n\
                     Check that the path is not a file and that you can write to its parent.",
                    path.display(),
                    source
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::SourceNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::Walk(e) => AppError::ScanFailed {
                path: e.path().map(|p| p.to_path_buf()),
                message: e.to_string(),
            },
            ScannerError::Read { path, source } => AppError::ScanFailed {
                path: Some(path),
                message: source.to_string(),
            },
        }
    }
}

impl From<ManifestError> for AppError {
    fn from(err: ManifestError) -> Self {
        AppError::Manifest(err)
    }
}

impl From<RelocateError> for AppError {
    fn from(err: RelocateError) -> Self {
        match err {
            RelocateError::Source(e) => e.into(),
            RelocateError::DestinationUnavailable { path, source } => {
                AppError::DestinationUnavailable { path, source }
            }
        }
    }
}
