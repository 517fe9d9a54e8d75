//! Driver errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use vulnfix_parse::ParseError;

/// A problem with one file. Recorded in the summary; the batch goes on.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot parse {}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl FileError {
    /// Short name of the step that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            FileError::Read { .. } => "read",
            FileError::Parse { .. } => "parse",
            FileError::Write { .. } => "write",
        }
    }
}

/// A problem that stops the whole run.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot open source root {}: {source}", path.display())]
    SourceRoot { path: PathBuf, source: io::Error },

    #[error("source root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("cannot write report {}: {source}", path.display())]
    Report { path: PathBuf, source: io::Error },

    #[error("cannot encode report: {0}")]
    Encode(#[from] serde_json::Error),
}
