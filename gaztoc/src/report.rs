//! Console reporting for a run.
use std::io::{self, Write};

use gaztoc_html::{FileReport, ProcessingOutcome, RunReport};

use crate::cli::ReportFormat;

const RULE_WIDTH: usize = 60;

fn rule<W: Write>(out: &mut W) -> io::Result<()> {
  writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

/// Header printed before any work is done.
///
/// # Errors
///
/// Propagates write failures of `out`.
pub fn write_banner<W: Write>(
  out: &mut W,
  mode: &str,
  dry_run: bool,
  force: bool,
) -> io::Result<()> {
  rule(out)?;
  writeln!(out, "  GAZ Tank - Table of Contents {mode}")?;
  rule(out)?;
  if dry_run {
    writeln!(out, "⚠️  DRY RUN MODE enabled - No files will be modified")?;
  }
  if force {
    writeln!(out, "🔄 FORCE MODE enabled - Processing all files")?;
  }
  writeln!(out)
}

fn marker(outcome: &ProcessingOutcome) -> &'static str {
  match outcome {
    ProcessingOutcome::Error { .. } => "❌ ",
    ProcessingOutcome::SkippedNoHeadings => "⚠️  ",
    o if o.is_skipped() => "⏭️  ",
    _ => "✅ ",
  }
}

fn write_file_line<W: Write>(
  out: &mut W,
  file: &FileReport,
  dry_run: bool,
) -> io::Result<()> {
  writeln!(
    out,
    "  {}{}: {}",
    marker(&file.outcome),
    file.path.display(),
    file.outcome.describe(dry_run)
  )
}

/// Human readable report: file lines, summary block, final status.
///
/// # Errors
///
/// Propagates write failures of `out`.
pub fn write_text_report<W: Write>(
  out: &mut W,
  report: &RunReport,
  mode: &str,
) -> io::Result<()> {
  let summary = &report.summary;

  writeln!(out, "📂 Scanning: {}", report.root.display())?;
  if report.files.is_empty() {
    return writeln!(out, "   No HTML files found to process");
  }
  writeln!(out, "   Found {} HTML file(s)", report.files.len())?;
  writeln!(out)?;

  let operation = if mode == "Strip" {
    "Stripping"
  } else {
    "Processing"
  };
  writeln!(out, "{operation} HTML files...")?;
  for file in &report.files {
    write_file_line(out, file, summary.dry_run)?;
  }

  writeln!(out)?;
  rule(out)?;
  writeln!(out, "  Summary")?;
  rule(out)?;
  writeln!(out, "  Files processed:  {}", summary.processed)?;
  writeln!(out, "  Files skipped:    {}", summary.skipped)?;
  writeln!(out, "  Errors:           {}", summary.errors)?;
  rule(out)?;
  writeln!(out)?;

  let mode = mode.to_lowercase();
  if summary.has_errors() {
    writeln!(out, "❌ TOC {mode} completed with errors")
  } else {
    writeln!(out, "✅ TOC {mode} completed successfully")
  }
}

/// Machine readable report, one pretty-printed JSON document.
///
/// # Errors
///
/// Propagates serialization and write failures.
pub fn write_json_report<W: Write>(
  out: &mut W,
  report: &RunReport,
) -> io::Result<()> {
  serde_json::to_writer_pretty(&mut *out, report)?;
  writeln!(out)
}

/// Write `report` in the requested format.
///
/// # Errors
///
/// Propagates write failures of `out`.
pub fn write_report<W: Write>(
  out: &mut W,
  report: &RunReport,
  format: ReportFormat,
  mode: &str,
) -> io::Result<()> {
  match format {
    ReportFormat::Text => write_text_report(out, report, mode),
    ReportFormat::Json => write_json_report(out, report),
  }
}
