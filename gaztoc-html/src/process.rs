//! Per-file decision logic: skip, inject or strip, then write back.
use std::{
  fs,
  io::{self, Write},
  path::Path,
};

use log::debug;
use tempfile::NamedTempFile;

use crate::{
  document::Document,
  error::{Result, TocError},
  headings::{UsedIds, assign_ids},
  outline::build_outline,
  render::render_toc,
  scan::is_excluded,
  types::{HeadingCounts, ProcessingOutcome, RunOptions},
};

/// Apply the run mode to an already parsed document.
///
/// The document is mutated in place when the outcome is `Processed` or
/// `Stripped`; for every other outcome it is left untouched.
#[must_use]
pub fn process_document(
  document: &Document,
  options: &RunOptions,
) -> ProcessingOutcome {
  if options.strip {
    return strip_document(document);
  }

  if !options.force && document.has_toc() && document.heading_id_count() > 0 {
    return ProcessingOutcome::SkippedAlreadyProcessed;
  }

  // Checked before any mutation so such files stay byte-identical.
  if document.headings().is_empty() {
    return ProcessingOutcome::SkippedNoHeadings;
  }

  let mut used = UsedIds::new();
  let records = assign_ids(document, &mut used);
  let outline = build_outline(&records);
  let markup = render_toc(&outline, &options.section_title);

  if !document.inject_toc(&markup) {
    return ProcessingOutcome::Error {
      reason: "Failed to inject TOC".to_string(),
    };
  }

  ProcessingOutcome::Processed {
    counts: HeadingCounts::from_records(&records),
  }
}

fn strip_document(document: &Document) -> ProcessingOutcome {
  if !document.has_toc() && document.heading_id_count() == 0 {
    return ProcessingOutcome::SkippedNothingToStrip;
  }

  let counts = document.strip();
  ProcessingOutcome::Stripped {
    ids_removed: counts.ids_removed,
    toc_removed: counts.toc_removed,
  }
}

/// Run [`process_document`] over a string, returning the new markup when
/// the document changed.
#[must_use]
pub fn process_source(
  html: &str,
  options: &RunOptions,
) -> (ProcessingOutcome, Option<String>) {
  let document = Document::parse(html);
  let outcome = process_document(&document, options);
  let output = outcome.modifies_document().then(|| document.to_html());
  (outcome, output)
}

/// Process one file on disk.
///
/// Failures are folded into [`ProcessingOutcome::Error`] so a batch can carry
/// on. Nothing is written in dry-run mode, and a failed write leaves the
/// previous content in place.
#[must_use]
pub fn process_file(path: &Path, options: &RunOptions) -> ProcessingOutcome {
  if is_excluded(path) {
    return ProcessingOutcome::SkippedExcluded;
  }

  match try_process_file(path, options) {
    Ok(outcome) => outcome,
    Err(e) => {
      ProcessingOutcome::Error {
        reason: e.to_string(),
      }
    },
  }
}

fn try_process_file(
  path: &Path,
  options: &RunOptions,
) -> Result<ProcessingOutcome> {
  let document = Document::from_bytes(fs::read(path)?)?;
  let outcome = process_document(&document, options);

  if outcome.modifies_document() {
    if options.dry_run {
      debug!("Dry run, not writing {}", path.display());
    } else {
      write_atomic(path, &document.to_html())?;
    }
  }

  Ok(outcome)
}

/// Replace `path` with `contents` via a temporary file in the same
/// directory, so readers see either the old or the new file.
///
/// Symlinks are resolved first; the file they point at is replaced and the
/// link stays in place.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
  let write_error = |source: io::Error| {
    TocError::Write {
      path: path.to_path_buf(),
      source,
    }
  };

  let target = fs::canonicalize(path).map_err(write_error)?;
  let dir = target.parent().unwrap_or_else(|| Path::new("."));
  let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
  temp.write_all(contents.as_bytes()).map_err(write_error)?;
  temp.as_file().sync_all().map_err(write_error)?;

  if let Ok(metadata) = fs::metadata(&target) {
    temp
      .as_file()
      .set_permissions(metadata.permissions())
      .map_err(write_error)?;
  }

  temp.persist(&target).map_err(|e| write_error(e.error))?;
  Ok(())
}
