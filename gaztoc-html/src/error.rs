use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for TOC generation.
///
/// Root-level variants are fatal and abort a run before any file is read.
/// Everything else is recovered per file and reported as
/// [`ProcessingOutcome::Error`](crate::ProcessingOutcome::Error).
#[derive(Debug, Error)]
pub enum TocError {
  #[error("Root directory not found: {}", .0.display())]
  RootNotFound(PathBuf),

  #[error("Root path is not a directory: {}", .0.display())]
  RootNotDirectory(PathBuf),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Parse error: {0}")]
  Parse(String),

  #[error("Write error: {path}: {source}")]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to build thread pool: {0}")]
  ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, TocError>;
