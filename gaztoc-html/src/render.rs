//! Renders the outline into the `<nav class="table-of-contents">` block.
//!
//! The wrapper markup (section header, toggle buttons) is what the site's
//! stylesheet and TOC script look for, so it should only change together
//! with them.
use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::types::TocNode;

/// Indentation of the top-level entries inside the wrapper.
const BASE_DEPTH: usize = 6;

/// Render `outline` as TOC markup. An empty outline renders nothing.
#[must_use]
pub fn render_toc(outline: &[TocNode], section_title: &str) -> String {
  if outline.is_empty() {
    return String::new();
  }

  let mut entries = String::new();
  for node in outline {
    render_node(&mut entries, node, BASE_DEPTH);
  }

  format!(
    r#"<nav class="table-of-contents">
  <div class="toc-header">
    <div class="toc-header-left">
      <ul>
        <li class="toc-section">
          <div class="toc-section-header">
            <button class="toc-section-toggle" data-section="headings">▼</button>
            <span class="toc-section-title">{title}</span>
          </div>
          <ul class="toc-section-content" data-section="headings">
{entries}          </ul>
        </li>
      </ul>
    </div>
    <div class="toc-header-right">
      <button class="toc-toggle" aria-label="Toggle table of contents">▼</button>
    </div>
  </div>
</nav>"#,
    title = encode_text(section_title),
  )
}

fn render_node(out: &mut String, node: &TocNode, depth: usize) {
  let indent = "  ".repeat(depth);
  let link = format!(
    r##"<a href="#{}">{}</a>"##,
    encode_double_quoted_attribute(&node.id),
    encode_text(&node.title)
  );

  if node.children.is_empty() {
    let _ = writeln!(out, "{indent}<li>{link}</li>");
    return;
  }

  let _ = writeln!(out, "{indent}<li>{link}");
  let _ = writeln!(out, "{indent}  <ul>");
  for child in &node.children {
    render_node(out, child, depth + 2);
  }
  let _ = writeln!(out, "{indent}  </ul>");
  let _ = writeln!(out, "{indent}</li>");
}
