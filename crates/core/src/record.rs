//! Line-oriented annotation records.
//!
//! Each non-blank line is one annotation: string fields joined by a literal
//! delimiter token, with no escaping. The last field is the annotation value;
//! everything before it is the identity prefix naming the program element.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::{AnnocmpError, Result};

/// Delimiter used by the inference producer and the hand-written files.
pub const DEFAULT_DELIMITER: &str = "and";

/// One parsed annotation line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationRecord {
  /// The line as read, without its line terminator.
  text: String,
  /// `text` trimmed and split on the delimiter.
  fields: Vec<String>,
}

impl AnnotationRecord {
  /// Split a line into a record. Returns `None` for lines with fewer than two fields.
  pub fn from_line(line: &str, delimiter: &str) -> Option<Self> {
    let fields: Vec<String> = line.trim().split(delimiter).map(String::from).collect();
    if fields.len() < 2 {
      return None;
    }
    Some(Self {
      text: line.to_string(),
      fields,
    })
  }

  /// The rendered line. Keyword matching and corpus comparison operate on this.
  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn fields(&self) -> &[String] {
    &self.fields
  }

  /// All fields but the last: the join key across files.
  pub fn identity_prefix(&self) -> &[String] {
    &self.fields[..self.fields.len() - 1]
  }

  /// The trailing value field.
  pub fn value(&self) -> &str {
    &self.fields[self.fields.len() - 1]
  }

  /// True if `needle` occurs anywhere in the rendered line.
  pub fn contains(&self, needle: &str) -> bool {
    self.text.contains(needle)
  }
}

impl fmt::Display for AnnotationRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.text)
  }
}

/// How lines are split into fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFormat {
  pub delimiter: String,
}

impl Default for RecordFormat {
  fn default() -> Self {
    Self {
      delimiter: DEFAULT_DELIMITER.to_string(),
    }
  }
}

impl RecordFormat {
  pub fn new(delimiter: impl Into<String>) -> Self {
    Self {
      delimiter: delimiter.into(),
    }
  }

  /// Parse file content. `origin` is only used to label errors.
  pub fn parse_str(&self, content: &str, origin: &Path) -> Result<Vec<AnnotationRecord>> {
    if self.delimiter.is_empty() {
      return Err(AnnocmpError::Config("record delimiter must not be empty".to_string()));
    }

    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
      if line.trim().is_empty() {
        continue;
      }
      let record = AnnotationRecord::from_line(line, &self.delimiter).ok_or_else(|| AnnocmpError::MalformedRecord {
        path: origin.to_path_buf(),
        line: idx + 1,
        content: line.to_string(),
      })?;
      records.push(record);
    }
    Ok(records)
  }
}

/// Read a whole file and parse every line into a record.
///
/// The file must exist; a missing path yields [`AnnocmpError::NotFound`].
pub fn parse_file(path: &Path, format: &RecordFormat) -> Result<Vec<AnnotationRecord>> {
  let content = std::fs::read_to_string(path).map_err(|e| AnnocmpError::io(path, e))?;
  let records = format.parse_str(&content, path)?;
  debug!("Parsed {} records from {}", records.len(), path.display());
  Ok(records)
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  const OWNING_FIELD: &str = r#"or (filename = "Store/Directory.cs" and lineNumber = "42" and programElementType = "Field" and programElementName = "input" and annotation = "Owning")"#;

  #[test]
  fn test_split_preserves_field_order() {
    let record = AnnotationRecord::from_line(OWNING_FIELD, "and").unwrap();

    assert_eq!(record.fields().len(), 5);
    assert_eq!(record.fields()[0], r#"or (filename = "Store/Directory.cs" "#);
    assert_eq!(record.value(), r#" annotation = "Owning")"#);
    assert_eq!(record.identity_prefix().len(), 4);
    assert_eq!(record.text(), OWNING_FIELD);
  }

  #[test]
  fn test_records_always_have_prefix_and_value() {
    assert!(AnnotationRecord::from_line("", "and").is_none());
    assert!(AnnotationRecord::from_line("no delimiter", " and ").is_none());

    let record = AnnotationRecord::from_line("a and b", " and ").unwrap();
    assert_eq!(record.identity_prefix(), &["a"]);
    assert_eq!(record.value(), "b");
  }

  #[test]
  fn test_strips_line_terminators() {
    let content = format!("{}\r\n{}\n", OWNING_FIELD, OWNING_FIELD);
    let records = RecordFormat::default().parse_str(&content, Path::new("m.csv")).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0], records[1]);
    assert!(!records[0].text().ends_with('\r'));
  }

  #[test]
  fn test_blank_lines_are_skipped() {
    let content = format!("\n{}\n   \n", OWNING_FIELD);
    let records = RecordFormat::default().parse_str(&content, Path::new("m.csv")).unwrap();
    assert_eq!(records.len(), 1);
  }

  #[test]
  fn test_malformed_record_names_file_and_line() {
    let content = format!("{}\nno delimiter here\n", OWNING_FIELD);
    let err = RecordFormat::new(" and ")
      .parse_str(&content, Path::new("manual.csv"))
      .unwrap_err();

    match err {
      AnnocmpError::MalformedRecord { path, line, content } => {
        assert_eq!(path, Path::new("manual.csv"));
        assert_eq!(line, 2);
        assert_eq!(content, "no delimiter here");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_empty_delimiter_is_rejected() {
    let err = RecordFormat::new("").parse_str("a.b", Path::new("x")).unwrap_err();
    assert!(matches!(err, AnnocmpError::Config(_)));
  }

  #[test]
  fn test_custom_delimiter() {
    let records = RecordFormat::new(".")
      .parse_str("P.F1.Owning.Field\"Property\n", Path::new("m"))
      .unwrap();
    assert_eq!(records[0].fields(), &["P", "F1", "Owning", "Field\"Property"]);
    assert_eq!(records[0].identity_prefix(), &["P", "F1", "Owning"]);
  }

  #[test]
  fn test_parse_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.csv");

    let err = parse_file(&path, &RecordFormat::default()).unwrap_err();
    assert!(matches!(err, AnnocmpError::NotFound(p) if p == path));
  }

  #[test]
  fn test_parse_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("inferred.csv");
    std::fs::write(&path, format!("{}\n", OWNING_FIELD)).unwrap();

    let records = parse_file(&path, &RecordFormat::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].contains("Owning"));
  }
}
