//! Error types for document loading
//!
//! Every variant carries the path of the document it belongs to so that a
//! batch can report failures per file and keep going.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file format for {}: {reason}", path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Unreadable .docx archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Worker for {} stopped before finishing: {message}", path.display())]
    Task { path: PathBuf, message: String },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::InvalidFormat { path, .. }
            | LoadError::Archive { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::Task { path, .. } => path,
        }
    }
}
