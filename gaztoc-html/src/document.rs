//! Parsed HTML documents and the mutations applied to them.
//!
//! Content files are usually fragments (no `<html>` or `<body>`), which
//! html5ever wraps in a full document while parsing. [`Document`] remembers
//! which kind of source it was given so that serializing a fragment does not
//! add wrappers the file never had.
use std::io;

use kuchikikiki::NodeRef;
use log::{trace, warn};
use markup5ever::local_name;
use tendril::TendrilSink;

use crate::error::{Result, TocError};

/// Selector for the injected container.
pub const TOC_SELECTOR: &str = "nav.table-of-contents";

/// Headings that receive ids and appear in the outline.
pub const HEADING_SELECTOR: &str = "h2, h3, h4";

/// What [`Document::strip`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripCounts {
  pub ids_removed: usize,
  pub toc_removed: bool,
}

/// An HTML document or fragment held as a mutable DOM tree.
#[derive(Debug, Clone)]
pub struct Document {
  root:     NodeRef,
  fragment: bool,
}

impl Document {
  /// Parse `html`. html5ever recovers from any malformed markup, so this
  /// cannot fail.
  #[must_use]
  pub fn parse(html: &str) -> Self {
    Self {
      root:     kuchikikiki::parse_html().one(html),
      fragment: !looks_like_full_document(html),
    }
  }

  /// Parse raw file contents.
  ///
  /// # Errors
  ///
  /// Returns [`TocError::Parse`] if the bytes are not valid UTF-8.
  pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
    let html = String::from_utf8(bytes)
      .map_err(|e| TocError::Parse(format!("invalid UTF-8: {e}")))?;
    Ok(Self::parse(&html))
  }

  #[must_use]
  pub const fn is_fragment(&self) -> bool {
    self.fragment
  }

  /// All elements matching `selector`, collected up front so callers may
  /// mutate the tree while walking them.
  fn select_all(&self, selector: &str) -> Vec<NodeRef> {
    self.root.select(selector).map_or_else(
      |()| Vec::new(),
      |matches| matches.map(|m| m.as_node().clone()).collect(),
    )
  }

  /// `h2`, `h3` and `h4` elements in document order.
  #[must_use]
  pub fn headings(&self) -> Vec<NodeRef> {
    self.select_all(HEADING_SELECTOR)
  }

  #[must_use]
  pub fn has_toc(&self) -> bool {
    self
      .root
      .select(TOC_SELECTOR)
      .is_ok_and(|mut matches| matches.next().is_some())
  }

  /// Number of `h2`/`h3`/`h4` elements carrying an `id`.
  #[must_use]
  pub fn heading_id_count(&self) -> usize {
    self
      .headings()
      .iter()
      .filter(|heading| {
        heading.as_element().is_some_and(|element| {
          element.attributes.borrow().contains(local_name!("id"))
        })
      })
      .count()
  }

  /// Remove every TOC container, returning how many were found.
  pub fn remove_toc(&self) -> usize {
    let containers = self.select_all(TOC_SELECTOR);
    for container in &containers {
      container.detach();
    }
    trace!("Removed {} TOC container(s)", containers.len());
    containers.len()
  }

  /// Remove the `id` attribute from every `h2`/`h3`/`h4`.
  pub fn remove_heading_ids(&self) -> usize {
    self
      .headings()
      .iter()
      .filter_map(|node| node.as_element())
      .filter(|element| {
        element
          .attributes
          .borrow_mut()
          .remove(local_name!("id"))
          .is_some()
      })
      .count()
  }

  /// Replace any existing TOC with `markup`.
  ///
  /// The container goes right after the first `h1`. Without an `h1` it is
  /// placed before the first element of `<main>` (or `<body>`), stepping over
  /// a leading `<div data-hashtags>` block. Returns `false` if `markup` holds
  /// no TOC container.
  pub fn inject_toc(&self, markup: &str) -> bool {
    self.remove_toc();

    let Some(container) = parse_container(markup) else {
      return false;
    };

    if let Ok(h1) = self.root.select_first("h1") {
      trace!("Inserting TOC after h1");
      h1.as_node().insert_after(container);
      return true;
    }

    let Some(region) = self.content_region() else {
      return false;
    };

    match region.children().find(is_insertion_anchor) {
      Some(anchor) => {
        trace!("Inserting TOC before first content element");
        anchor.insert_before(container);
      },
      None => region.append(container),
    }
    true
  }

  /// Remove TOC containers and heading ids.
  pub fn strip(&self) -> StripCounts {
    let toc_removed = self.remove_toc() > 0;
    let ids_removed = self.remove_heading_ids();
    StripCounts {
      ids_removed,
      toc_removed,
    }
  }

  fn content_region(&self) -> Option<NodeRef> {
    self
      .root
      .select_first("main")
      .or_else(|()| self.root.select_first("body"))
      .ok()
      .map(|region| region.as_node().clone())
  }

  /// Serialize back to markup. Fragments are written without the
  /// `<html>`/`<head>`/`<body>` wrappers added during parsing.
  #[must_use]
  pub fn to_html(&self) -> String {
    let mut out = Vec::new();
    let written = if self.fragment {
      self.serialize_fragment(&mut out)
    } else {
      self.root.serialize(&mut out)
    };
    if let Err(e) = written {
      warn!("Failed to serialize document: {e}");
    }
    String::from_utf8_lossy(&out).into_owned()
  }

  fn serialize_fragment(&self, out: &mut Vec<u8>) -> io::Result<()> {
    for node in self.root.children() {
      // Comments outside <html> hang off the document node itself.
      if node.as_comment().is_some() {
        node.serialize(out)?;
        continue;
      }
      for wrapper in node.children().filter(|n| n.as_element().is_some()) {
        for child in wrapper.children() {
          child.serialize(out)?;
        }
      }
    }
    Ok(())
  }
}

/// Whether `html` brings its own document structure, judged by the first
/// token after any leading whitespace and comments.
fn looks_like_full_document(html: &str) -> bool {
  let mut rest = html.trim_start();
  while let Some(comment) = rest.strip_prefix("<!--") {
    let Some(end) = comment.find("-->") else {
      return false;
    };
    rest = comment[end + 3..].trim_start();
  }

  let head = rest.get(..9).unwrap_or(rest).to_ascii_lowercase();
  ["<!doctype", "<html", "<head", "<body"]
    .iter()
    .any(|marker| head.starts_with(marker))
}

/// Parse rendered TOC markup and detach its container.
fn parse_container(markup: &str) -> Option<NodeRef> {
  if markup.trim().is_empty() {
    return None;
  }
  let parsed = kuchikikiki::parse_html().one(markup);
  let container = parsed.select_first(TOC_SELECTOR).ok()?.as_node().clone();
  container.detach();
  Some(container)
}

/// Elements a TOC may be placed in front of.
fn is_insertion_anchor(node: &NodeRef) -> bool {
  node.as_element().is_some_and(|element| {
    !(element.name.local == local_name!("div")
      && element.attributes.borrow().contains("data-hashtags"))
  })
}
