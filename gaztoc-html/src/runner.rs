//! Batch processing of a whole content directory.
use std::path::Path;

use log::{debug, error, info};
use rayon::prelude::*;

use crate::{
  error::Result,
  process::process_file,
  scan::scan_html_files,
  types::{FileReport, ProcessingOutcome, RunOptions, RunReport, RunSummary},
};

/// Process every content file under `root`.
///
/// Files are handled independently on a dedicated thread pool; each worker
/// parses its own document and owns its id set. Reports come back in the
/// scanner's sorted order regardless of which worker finished first.
///
/// # Errors
///
/// Only fatal problems are returned: a missing or unreadable root, or a
/// thread pool that cannot be built. Failures on individual files end up in
/// the report instead.
pub fn run(root: &Path, options: &RunOptions) -> Result<RunReport> {
  let files = scan_html_files(root)?;
  info!("Found {} HTML file(s) in {}", files.len(), root.display());

  let threads = options.jobs.unwrap_or_else(num_cpus::get).max(1);
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(threads)
    .build()?;
  debug!("Processing with {threads} worker thread(s)");

  let reports: Vec<FileReport> = pool.install(|| {
    files
      .par_iter()
      .map(|path| {
        let outcome = process_file(path, options);
        let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        log_outcome(&rel_path, &outcome, options.dry_run);
        FileReport {
          path: rel_path,
          outcome,
        }
      })
      .collect()
  });

  let summary = reports.iter().fold(
    RunSummary::new(options.dry_run),
    |mut summary, report| {
      summary.record(&report.outcome);
      summary
    },
  );

  info!(
    "Summary: {} processed, {} skipped, {} errors",
    summary.processed, summary.skipped, summary.errors
  );

  Ok(RunReport {
    root: root.to_path_buf(),
    files: reports,
    summary,
  })
}

fn log_outcome(path: &Path, outcome: &ProcessingOutcome, dry_run: bool) {
  let message = outcome.describe(dry_run);
  if outcome.is_error() {
    error!("{}: {message}", path.display());
  } else if outcome.is_skipped() {
    debug!("{}: {message}", path.display());
  } else {
    info!("{}: {message}", path.display());
  }
}
