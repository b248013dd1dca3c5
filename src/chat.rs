use ammonia::Builder;
use chrono::{DateTime, NaiveDateTime};
use lazy_static::lazy_static;
use std::collections::HashSet;
use validator::ValidationError;

pub const MAX_MESSAGE_LENGTH: usize = 500;
pub const MAX_REVIEW_LENGTH: usize = 2000;

lazy_static! {
  static ref SANITIZER: Builder<'static> = {
    let mut builder = Builder::empty();
    builder.clean_content_tags(["script", "style"].into_iter().collect::<HashSet<_>>());
    builder
  };
}

/// Undoes the escaping html5ever applies when serializing text nodes. With no
/// tags allowed the cleaned document is a single run of text, so these are
/// the only entities it can contain.
fn unescape_text(serialized: &str) -> String {
  serialized
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&nbsp;", "\u{a0}")
    .replace("&amp;", "&")
}

/// Strips every tag from user text, dropping script and style contents.
/// The result is plain text; clients escape it when rendering.
pub fn sanitize(body: &str) -> String {
  unescape_text(&SANITIZER.clean(body).to_string())
    .trim()
    .to_string()
}

fn check_length(cleaned: &str, max: usize) -> Result<(), ValidationError> {
  if cleaned.chars().count() > max {
    return Err(ValidationError::new("too_long"));
  }

  Ok(())
}

pub fn sanitize_message(body: &str) -> Result<String, ValidationError> {
  let cleaned = sanitize(body);

  if cleaned.is_empty() {
    return Err(ValidationError::new("blank"));
  }

  check_length(&cleaned, MAX_MESSAGE_LENGTH)?;

  Ok(cleaned)
}

/// Review bodies may be empty; the limit applies to the stored text.
pub fn sanitize_review(body: &str) -> Result<String, ValidationError> {
  let cleaned = sanitize(body);
  check_length(&cleaned, MAX_REVIEW_LENGTH)?;

  Ok(cleaned)
}

/// Parses a history cursor, either RFC 3339 or a naive UTC timestamp.
pub fn parse_cursor(before: &str) -> Option<NaiveDateTime> {
  DateTime::parse_from_rfc3339(before)
    .map(|at| at.naive_utc())
    .ok()
    .or_else(|| NaiveDateTime::parse_from_str(before, "%Y-%m-%dT%H:%M:%S%.f").ok())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_markup() {
    assert_eq!(sanitize("<b>gg</b> <i>wp</i>"), "gg wp");
  }

  #[test]
  fn drops_script_contents() {
    assert_eq!(sanitize("<script>alert(1)</script>hello"), "hello");
  }

  #[test]
  fn rejects_blank_messages() {
    let error = sanitize_message("   <br>  ").unwrap_err();
    assert_eq!(error.code, "blank");
  }

  #[test]
  fn rejects_long_messages() {
    let error = sanitize_message(&"a".repeat(MAX_MESSAGE_LENGTH + 1)).unwrap_err();
    assert_eq!(error.code, "too_long");
    assert!(sanitize_message(&"a".repeat(MAX_MESSAGE_LENGTH)).is_ok());
  }

  #[test]
  fn keeps_special_characters_as_typed() {
    assert_eq!(sanitize("Tom & Jerry"), "Tom & Jerry");
    assert_eq!(sanitize("1 < 2 > 0"), "1 < 2 > 0");
    assert_eq!(sanitize("<b>fish &amp; chips</b>"), "fish & chips");
  }

  #[test]
  fn length_counts_characters_not_entities() {
    let ampersands = "&".repeat(MAX_MESSAGE_LENGTH);
    assert_eq!(sanitize_message(&ampersands).unwrap(), ampersands);

    let brackets = "<".repeat(MAX_MESSAGE_LENGTH + 1);
    assert_eq!(sanitize_message(&brackets).unwrap_err().code, "too_long");
  }

  #[test]
  fn review_limit_applies_after_cleaning() {
    let tagged = format!("<p>{}</p>", "a".repeat(MAX_REVIEW_LENGTH));
    assert_eq!(sanitize_review(&tagged).unwrap().len(), MAX_REVIEW_LENGTH);

    let long = "&".repeat(MAX_REVIEW_LENGTH + 1);
    assert_eq!(sanitize_review(&long).unwrap_err().code, "too_long");

    assert_eq!(sanitize_review("").unwrap(), "");
  }

  #[test]
  fn parses_cursors() {
    let expected = chrono::NaiveDate::from_ymd_opt(2024, 3, 4)
      .unwrap()
      .and_hms_opt(12, 30, 0)
      .unwrap();

    assert_eq!(parse_cursor("2024-03-04T12:30:00Z"), Some(expected));
    assert_eq!(parse_cursor("2024-03-04T14:30:00+02:00"), Some(expected));
    assert_eq!(parse_cursor("2024-03-04T12:30:00"), Some(expected));
    assert_eq!(parse_cursor("yesterday"), None);
  }
}
