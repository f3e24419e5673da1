//! Heading extraction and id assignment.
use std::collections::HashSet;

use log::trace;
use markup5ever::local_name;

use crate::{
  document::Document,
  slug::slugify,
  types::{HeadingLevel, HeadingRecord},
};

/// Ids already handed out within one document.
///
/// Build a fresh set for every document; sharing one across files would make
/// ids depend on which files happened to be processed before.
#[derive(Debug, Default)]
pub struct UsedIds(HashSet<String>);

impl UsedIds {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Claim `base`, or the first free `base-1`, `base-2`, ... variant.
  pub fn claim(&mut self, base: &str) -> String {
    let mut candidate = base.to_string();
    let mut counter = 1;
    while self.0.contains(&candidate) {
      candidate = format!("{base}-{counter}");
      counter += 1;
    }
    self.0.insert(candidate.clone());
    candidate
  }

  #[must_use]
  pub fn contains(&self, id: &str) -> bool {
    self.0.contains(id)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Give every `h2`, `h3` and `h4` a unique `id` derived from its text.
///
/// Headings are visited in document order and existing ids are overwritten.
/// No other attribute is touched.
pub fn assign_ids(document: &Document, used: &mut UsedIds) -> Vec<HeadingRecord> {
  let mut records = Vec::new();

  for element in document.headings() {
    let Some(data) = element.as_element() else {
      continue;
    };
    let Some(level) = HeadingLevel::from_tag(&data.name.local) else {
      continue;
    };

    let text = normalize_whitespace(&element.text_contents());
    let id = used.claim(&slugify(&text));
    trace!("{level} {text:?} -> #{id}");

    data
      .attributes
      .borrow_mut()
      .insert(local_name!("id"), id.clone());

    records.push(HeadingRecord {
      level,
      text,
      id,
      element: element.clone(),
    });
  }

  records
}

/// Trim and collapse internal whitespace so wrapped headings read as one
/// line in the outline.
fn normalize_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}
