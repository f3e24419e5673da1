//! Builds the nested outline from the flat heading list.
use crate::types::{HeadingLevel, HeadingRecord, TocNode};

/// Where the most recent `h3` landed in the forest.
#[derive(Debug, Clone, Copy)]
enum H3Slot {
  /// Orphan `h3` at the top level.
  Root(usize),
  /// Child `index` of top-level node `parent`.
  Nested { parent: usize, index: usize },
}

/// Nest headings by level: `h3` under the preceding `h2`, `h4` under the
/// preceding `h3` (or the `h2` when no `h3` is open).
///
/// Headings with nothing to nest under become top-level nodes. Sibling order
/// follows the input.
#[must_use]
pub fn build_outline(records: &[HeadingRecord]) -> Vec<TocNode> {
  let mut forest: Vec<TocNode> = Vec::new();
  let mut current_h2: Option<usize> = None;
  let mut current_h3: Option<H3Slot> = None;

  for record in records {
    let node = TocNode::new(record.id.clone(), record.text.clone());

    match record.level {
      HeadingLevel::H2 => {
        forest.push(node);
        current_h2 = Some(forest.len() - 1);
        current_h3 = None;
      },
      HeadingLevel::H3 => {
        current_h3 = Some(match current_h2 {
          Some(parent) => {
            let children = &mut forest[parent].children;
            children.push(node);
            H3Slot::Nested {
              parent,
              index: children.len() - 1,
            }
          },
          None => {
            forest.push(node);
            H3Slot::Root(forest.len() - 1)
          },
        });
      },
      HeadingLevel::H4 => {
        match (current_h3, current_h2) {
          (Some(H3Slot::Root(index)), _) => {
            forest[index].children.push(node);
          },
          (Some(H3Slot::Nested { parent, index }), _) => {
            forest[parent].children[index].children.push(node);
          },
          (None, Some(parent)) => forest[parent].children.push(node),
          (None, None) => forest.push(node),
        }
      },
    }
  }

  forest
}
