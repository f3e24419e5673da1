//! # gaztoc-html - heading anchors and tables of contents for HTML content
//!
//! Walks a directory of HTML content files, gives every `h2`, `h3` and `h4`
//! a stable, unique `id` derived from its text, and injects a nested
//! `<nav class="table-of-contents">` right after the page's `h1`. Running it
//! twice is a no-op, and strip mode removes exactly what it added.
//!
//! ## Quick Start
//!
//! ```rust
//! use gaztoc_html::{Document, UsedIds, assign_ids, build_outline, render_toc};
//!
//! let document = Document::parse(
//!   "<h1>Guide</h1><h2>Introduction</h2><h3>Goals</h3><h2>Design</h2>",
//! );
//! let mut used = UsedIds::new();
//! let headings = assign_ids(&document, &mut used);
//! let outline = build_outline(&headings);
//! document.inject_toc(&render_toc(&outline, "Contents"));
//!
//! let html = document.to_html();
//! assert!(html.contains(r#"<h2 id="introduction">"#));
//! assert!(html.contains(r##"<a href="#goals">Goals</a>"##));
//! ```
//!
//! ## Processing a directory
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use gaztoc_html::{RunOptions, run};
//!
//! let report = run(Path::new("publish/dev"), &RunOptions {
//!   dry_run: true,
//!   ..RunOptions::default()
//! })?;
//! println!("{} processed", report.summary.processed);
//! # Ok::<(), gaztoc_html::TocError>(())
//! ```

pub mod document;
pub mod error;
pub mod headings;
pub mod outline;
pub mod process;
pub mod render;
pub mod runner;
pub mod scan;
pub mod slug;
pub mod types;

pub use crate::{
  document::{Document, StripCounts},
  error::{Result, TocError},
  headings::{UsedIds, assign_ids},
  outline::build_outline,
  process::{process_document, process_file, process_source},
  render::render_toc,
  runner::run,
  scan::{is_excluded, scan_html_files},
  slug::slugify,
  types::{
    FileReport,
    HeadingCounts,
    HeadingLevel,
    HeadingRecord,
    ProcessingOutcome,
    RunOptions,
    RunReport,
    RunSummary,
    TocNode,
  },
};
