//! Error types for the conversation pipeline.
//!
//! Every failure the library can surface maps onto one [`ErrorKind`], which is what a
//! hosting shell (CLI, desktop, HTTP) inspects to decide how to present it.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Coarse classification of failures, stable across variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing directory or file
    NotFound,
    /// A single malformed log line (contained by the reader, never propagated)
    ParseError,
    /// Read or write failure on export/archive
    IoError,
    /// Missing or malformed request parameters
    InvalidRequest,
    /// Backup requested for a project without conversation files
    EmptyProject,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse line {line} in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No conversations found in project {0}")]
    EmptyProject(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the path it happened on.
    ///
    /// `io::ErrorKind::NotFound` becomes [`Error::NotFound`] so callers only need to
    /// check one place for missing resources.
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound(path.to_path_buf())
        } else {
            Error::Io { path: path.to_path_buf(), source }
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Parse { .. } => ErrorKind::ParseError,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::EmptyProject(_) => ErrorKind::EmptyProject,
            Error::Io { .. } | Error::Archive(_) | Error::Serialization(_) | Error::Task(_) => {
                ErrorKind::IoError
            }
        }
    }
}
