//! Types shared by the extraction, outline and orchestration stages.
use std::{fmt, path::PathBuf};

use kuchikikiki::NodeRef;
use serde::Serialize;

/// Heading levels that take part in the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HeadingLevel {
  H2,
  H3,
  H4,
}

impl HeadingLevel {
  /// Map a tag name (`h2`, `h3`, `h4`) to its level.
  #[must_use]
  pub fn from_tag(tag: &str) -> Option<Self> {
    match tag {
      "h2" => Some(Self::H2),
      "h3" => Some(Self::H3),
      "h4" => Some(Self::H4),
      _ => None,
    }
  }

  #[must_use]
  pub const fn tag(self) -> &'static str {
    match self {
      Self::H2 => "h2",
      Self::H3 => "h3",
      Self::H4 => "h4",
    }
  }
}

impl fmt::Display for HeadingLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

/// A heading found in a document, after its id has been assigned.
///
/// `element` points back into the parsed tree. The tree owns the node; the
/// record only keeps a handle so the heading can be mutated later.
#[derive(Debug, Clone)]
pub struct HeadingRecord {
  pub level:   HeadingLevel,
  pub text:    String,
  pub id:      String,
  pub element: NodeRef,
}

/// One entry of the outline forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocNode {
  pub id:       String,
  pub title:    String,
  pub children: Vec<TocNode>,
}

impl TocNode {
  #[must_use]
  pub const fn new(id: String, title: String) -> Self {
    Self {
      id,
      title,
      children: Vec::new(),
    }
  }
}

/// Number of headings per level in a processed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadingCounts {
  pub h2: usize,
  pub h3: usize,
  pub h4: usize,
}

impl HeadingCounts {
  #[must_use]
  pub fn from_records(records: &[HeadingRecord]) -> Self {
    records.iter().fold(Self::default(), |mut counts, record| {
      match record.level {
        HeadingLevel::H2 => counts.h2 += 1,
        HeadingLevel::H3 => counts.h3 += 1,
        HeadingLevel::H4 => counts.h4 += 1,
      }
      counts
    })
  }

  #[must_use]
  pub const fn total(&self) -> usize {
    self.h2 + self.h3 + self.h4
  }
}

impl fmt::Display for HeadingCounts {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let parts: Vec<String> = [("h2", self.h2), ("h3", self.h3), ("h4", self.h4)]
      .into_iter()
      .filter(|(_, count)| *count > 0)
      .map(|(tag, count)| format!("{count} {tag}"))
      .collect();
    f.write_str(&parts.join(", "))
  }
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProcessingOutcome {
  Processed { counts: HeadingCounts },
  SkippedAlreadyProcessed,
  SkippedNoHeadings,
  SkippedExcluded,
  SkippedNothingToStrip,
  Stripped { ids_removed: usize, toc_removed: bool },
  Error { reason: String },
}

impl ProcessingOutcome {
  #[must_use]
  pub const fn is_skipped(&self) -> bool {
    matches!(
      self,
      Self::SkippedAlreadyProcessed
        | Self::SkippedNoHeadings
        | Self::SkippedExcluded
        | Self::SkippedNothingToStrip
    )
  }

  /// Whether the document was changed and needs writing back.
  #[must_use]
  pub const fn modifies_document(&self) -> bool {
    matches!(self, Self::Processed { .. } | Self::Stripped { .. })
  }

  #[must_use]
  pub const fn is_error(&self) -> bool {
    matches!(self, Self::Error { .. })
  }

  /// Human readable message for the report.
  ///
  /// Dry runs never claim that anything was written.
  #[must_use]
  pub fn describe(&self, dry_run: bool) -> String {
    match self {
      Self::Processed { counts } if dry_run => {
        format!("Would add TOC ({counts})")
      },
      Self::Processed { counts } => format!("TOC added ({counts})"),
      Self::SkippedAlreadyProcessed => {
        "Skipped (already processed, use --force to regenerate)".to_string()
      },
      Self::SkippedNoHeadings => "Skipped (no h2/h3/h4 headings)".to_string(),
      Self::SkippedExcluded => "Skipped (excluded)".to_string(),
      Self::SkippedNothingToStrip => {
        "Skipped (no TOC or IDs found)".to_string()
      },
      Self::Stripped {
        ids_removed,
        toc_removed,
      } => {
        let mut parts = Vec::new();
        if *toc_removed {
          parts.push("TOC".to_string());
        }
        parts.push(format!("{ids_removed} IDs"));
        let verb = if dry_run { "Would remove" } else { "Removed" };
        format!("{verb} {}", parts.join(", "))
      },
      Self::Error { reason } => format!("Error: {reason}"),
    }
  }
}

/// Outcome of one file, keyed by its path relative to the scanned root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  pub path:    PathBuf,
  #[serde(flatten)]
  pub outcome: ProcessingOutcome,
}

/// Aggregate counters for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
  pub processed: usize,
  pub skipped:   usize,
  pub errors:    usize,
  pub dry_run:   bool,
}

impl RunSummary {
  #[must_use]
  pub const fn new(dry_run: bool) -> Self {
    Self {
      processed: 0,
      skipped: 0,
      errors: 0,
      dry_run,
    }
  }

  pub const fn record(&mut self, outcome: &ProcessingOutcome) {
    if outcome.is_error() {
      self.errors += 1;
    } else if outcome.is_skipped() {
      self.skipped += 1;
    } else {
      self.processed += 1;
    }
  }

  #[must_use]
  pub const fn has_errors(&self) -> bool {
    self.errors > 0
  }
}

/// Per-file reports in scan order plus the aggregate summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  pub root:    PathBuf,
  pub files:   Vec<FileReport>,
  pub summary: RunSummary,
}

fn default_section_title() -> String {
  "Contents".to_string()
}

/// Switches for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
  /// Remove TOC markup and heading ids instead of adding them
  pub strip: bool,

  /// Regenerate even when a file already carries a TOC
  pub force: bool,

  /// Do everything except writing files back
  pub dry_run: bool,

  /// Worker threads; `None` uses one per CPU
  pub jobs: Option<usize>,

  /// Label shown above the heading list
  pub section_title: String,
}

impl Default for RunOptions {
  fn default() -> Self {
    Self {
      strip:         false,
      force:         false,
      dry_run:       false,
      jobs:          None,
      section_title: default_section_title(),
    }
  }
}
