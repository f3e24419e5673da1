//! Heading text to URL-safe identifiers.
use tendril::TendrilSink;

/// Identifier used when a heading reduces to nothing, e.g. `"1."` or `"???"`.
pub const FALLBACK_SLUG: &str = "heading";

/// Characters stripped from the front of a heading along with digits and
/// whitespace, covering numbering such as `1. ` and `2) `.
const NUMBERING_CHARS: &[char] = &['.', ')', ']', '}'];

/// Dropped without leaving a separator, so `don't` becomes `dont`.
const APOSTROPHES: &[char] = &['\'', '\u{2019}'];

/// Convert heading text to an identifier suitable for an `id` attribute.
///
/// The result always matches `^[a-z0-9]+(-[a-z0-9]+)*$`. Text that reduces to
/// nothing yields [`FALLBACK_SLUG`]; uniqueness within a document is the
/// caller's business (see [`UsedIds`](crate::UsedIds)).
///
/// # Examples
///
/// ```
/// use gaztoc_html::slugify;
///
/// assert_eq!(slugify("1. Meta Tags (index.html)"), "meta-tags-index-html");
/// assert_eq!(slugify("FAQ: Common Questions"), "faq-common-questions");
/// assert_eq!(slugify("<code>snake_case</code> names"), "snake-case-names");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
  let text = strip_markup(text).to_lowercase();

  let text = text.trim_start_matches(|c: char| {
    c.is_ascii_digit() || c.is_whitespace() || NUMBERING_CHARS.contains(&c)
  });

  let mut slug = String::with_capacity(text.len());
  let mut pending_separator = false;
  for c in text.chars() {
    if c.is_ascii_lowercase() || c.is_ascii_digit() {
      if pending_separator && !slug.is_empty() {
        slug.push('-');
      }
      pending_separator = false;
      slug.push(c);
    } else if !(APOSTROPHES.contains(&c) || c.is_alphanumeric()) {
      // Punctuation and whitespace separate words; letters outside ASCII
      // are dropped.
      pending_separator = true;
    }
  }

  if slug.is_empty() {
    FALLBACK_SLUG.to_string()
  } else {
    slug
  }
}

/// Text content of `text` with any tags removed and entities decoded.
fn strip_markup(text: &str) -> String {
  if !text.contains(['<', '&']) {
    return text.to_string();
  }
  kuchikikiki::parse_html().one(text).text_contents()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn is_well_formed(slug: &str) -> bool {
    !slug.is_empty()
      && !slug.starts_with('-')
      && !slug.ends_with('-')
      && !slug.contains("--")
      && slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
  }

  #[test]
  fn test_slugify_examples() {
    assert_eq!(slugify("1. Meta Tags (index.html)"), "meta-tags-index-html");
    assert_eq!(slugify("FAQ: Common Questions"), "faq-common-questions");
    assert_eq!(slugify("Introduction"), "introduction");
  }

  #[test]
  fn test_slugify_strips_numbering() {
    assert_eq!(slugify("2) Second step"), "second-step");
    assert_eq!(slugify("  3.1. Nested number"), "nested-number");
    assert_eq!(slugify("[4] Bracketed"), "4-bracketed");
  }

  #[test]
  fn test_slugify_keeps_inner_digits() {
    assert_eq!(slugify("Step 2 of 10"), "step-2-of-10");
    assert_eq!(slugify("HTTP/2 support"), "http-2-support");
    assert_eq!(slugify("Don't panic"), "dont-panic");
  }

  #[test]
  fn test_slugify_collapses_separators() {
    assert_eq!(slugify("a  -  b"), "a-b");
    assert_eq!(slugify("snake_case__words"), "snake-case-words");
    assert_eq!(slugify("--leading and trailing--"), "leading-and-trailing");
    assert_eq!(slugify("tabs\tand\nnewlines"), "tabs-and-newlines");
  }

  #[test]
  fn test_slugify_removes_markup() {
    assert_eq!(slugify("Using <em>emphasis</em> here"), "using-emphasis-here");
    assert_eq!(slugify("Fish &amp; Chips"), "fish-chips");
  }

  #[test]
  fn test_slugify_drops_non_ascii() {
    assert_eq!(slugify("Café Menu"), "caf-menu");
    assert_eq!(slugify("日本語 guide"), "guide");
  }

  #[test]
  fn test_slugify_fallback() {
    assert_eq!(slugify(""), FALLBACK_SLUG);
    assert_eq!(slugify("1."), FALLBACK_SLUG);
    assert_eq!(slugify("??? !!!"), FALLBACK_SLUG);
    assert_eq!(slugify("<br>"), FALLBACK_SLUG);
  }

  #[test]
  fn test_slugify_always_well_formed() {
    let samples = [
      "1. Meta Tags (index.html)",
      "  --Weird__ spacing --  ",
      "Ünïcödé Ønly",
      "A-B-C",
      "12345",
      "x",
      "Version 2.0 - Release notes",
    ];
    for sample in samples {
      let slug = slugify(sample);
      assert!(is_well_formed(&slug), "{sample:?} -> {slug:?}");
    }
  }
}
