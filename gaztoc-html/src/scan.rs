//! Discovery of content files under the root directory.
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use walkdir::WalkDir;

use crate::error::{Result, TocError};

/// The single-page-app shell. It is never treated as content, whatever the
/// flags say.
pub const SPA_SHELL: &str = "index.html";

/// Whether `path` is the SPA shell.
#[must_use]
pub fn is_excluded(path: &Path) -> bool {
  path.file_name().is_some_and(|name| name == SPA_SHELL)
}

/// Check that `root` exists and is a readable directory.
///
/// # Errors
///
/// Returns [`TocError::RootNotFound`], [`TocError::RootNotDirectory`] or the
/// I/O error from listing it.
pub fn validate_root(root: &Path) -> Result<()> {
  if !root.exists() {
    return Err(TocError::RootNotFound(root.to_path_buf()));
  }
  if !root.is_dir() {
    return Err(TocError::RootNotDirectory(root.to_path_buf()));
  }
  std::fs::read_dir(root)?;
  Ok(())
}

/// Recursively collect `.html` files under `root`, sorted by path, without
/// the SPA shell.
///
/// Entries below the root that cannot be read (permissions, symlink loops)
/// are logged and skipped.
///
/// # Errors
///
/// Fails if `root` is not a readable directory.
pub fn scan_html_files(root: &Path) -> Result<Vec<PathBuf>> {
  validate_root(root)?;

  let mut files = Vec::new();
  for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        warn!("Skipping unreadable entry under {}: {e}", root.display());
        continue;
      },
    };
    let path = entry.path();
    if entry.file_type().is_dir()
      || path.extension().is_none_or(|ext| ext != "html")
    {
      continue;
    }
    if is_excluded(path) {
      trace!("Excluding {}", path.display());
      continue;
    }
    files.push(path.to_path_buf());
  }

  files.sort();
  debug!("Found {} HTML files under {}", files.len(), root.display());
  Ok(files)
}
