//! Shared fixtures for comparison integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// One annotation row in the producer's format.
pub fn row(file: &str, line: u32, kind: &str, name: &str, annotation: &str) -> String {
  format!(
    r#"or (filename = "{file}" and lineNumber = "{line}" and programElementType = "{kind}" and programElementName = "{name}" and annotation = "{annotation}")"#
  )
}

/// One field-fact row; `mutability` is `OnlyRead` for fields assigned once.
pub fn fact(file: &str, line: u32, kind: &str, name: &str, mutability: &str) -> String {
  format!(
    r#"or (filename = "{file}" and lineNumber = "{line}" and programElementType = "{kind}" and programElementName = "{name}" and type = "{mutability}")"#
  )
}

/// Temp directory holding the three input files of one application.
pub struct Fixture {
  pub dir: TempDir,
  pub manual: PathBuf,
  pub inferred: PathBuf,
  pub field_info: PathBuf,
}

impl Fixture {
  pub fn new(manual: &[String], inferred: &[String], field_info: &[String]) -> Self {
    let dir = TempDir::new().unwrap();
    let manual_path = dir.path().join("app-manual-attributes.csv");
    let inferred_path = dir.path().join("app-inferred-attributes.csv");
    let field_info_path = dir.path().join("app-field-info.csv");

    write_lines(&manual_path, manual);
    write_lines(&inferred_path, inferred);
    write_lines(&field_info_path, field_info);

    Self {
      dir,
      manual: manual_path,
      inferred: inferred_path,
      field_info: field_info_path,
    }
  }
}

pub fn write_lines(path: &PathBuf, lines: &[String]) {
  let mut content = lines.join("\n");
  content.push('\n');
  std::fs::write(path, content).unwrap();
}

/// A small Lucene-like application: thirteen manual lines, nine inferred.
pub fn lucene_like() -> Fixture {
  let manual = vec![
    row("Store/Directory.cs", 12, "Field", "input", "Owning"),
    row("Store/Directory.cs", 13, "Field", "writer", "Owning"),
    row("Store/Directory.cs", 14, "Property", "Stream", "Owning"),
    row("Index/IndexWriter.cs", 40, "Parameter", "conn", "Owning"),
    row("Index/IndexWriter.cs", 40, "Parameter", "conn", "Owning"),
    row("Index/IndexWriter.cs", 52, "Parameter", "other", "Owning"),
    row("Index/IndexWriter.cs", 60, "Method", "GetConnection", "NonOwning"),
    row("Index/IndexWriter.cs", 70, "Method", "OpenInput", "Owning"),
    row("Index/IndexWriter.cs", 80, "Method", "Dispose", "EnsuresCalledMethods(conn)"),
    row("Index/IndexWriter.cs", 90, "Method", "Reset", "CreateMustCallFor(this)"),
    row("Index/IndexWriter.cs", 10, "Class", "IndexWriter", "MustCall(Dispose)"),
    row("Store/Directory.cs", 5, "Class", "Directory", "MustCall"),
    row("Util/IOUtils.cs", 22, "Method", "Wrap", "MustCallAlias"),
  ];
  let inferred = vec![
    row("Store/Directory.cs", 12, "Field", "input", "Owning"),
    row("Store/Directory.cs", 13, "Field", "writer", "Owning"),
    row("Index/IndexWriter.cs", 40, "Parameter", "conn", "Owning"),
    row("Index/IndexWriter.cs", 41, "Parameter", "extra", "Owning"),
    row("Index/IndexWriter.cs", 60, "Method", "GetConnection", "NonOwning"),
    row("Index/IndexWriter.cs", 80, "Method", "Dispose", "EnsuresCalledMethods(conn)"),
    row("Index/IndexWriter.cs", 10, "Class", "IndexWriter", "MustCall(Dispose)"),
    row("Index/IndexWriter.cs", 70, "Method", "OpenInput", "Owning"),
    row("Store/Directory.cs", 5, "Class", "Directory", "MustCall"),
  ];
  let field_info = vec![
    fact("Store/Directory.cs", 12, "Field", "input", "OnlyRead"),
    fact("Store/Directory.cs", 13, "Field", "writer", "Written"),
  ];
  Fixture::new(&manual, &inferred, &field_info)
}
