//! Report output.
//!
//! - Summary: the one-line `overlap/total` format consumed by the table scripts
//! - JSON: every category with its matched lines, for inspection and diffing

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Aggregate, Comparison};
use crate::taxonomy::Category;
use crate::{AnnocmpError, Result};

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
  /// Report generation timestamp
  pub timestamp: DateTime<Utc>,
  /// annocmp version
  pub version: String,
  /// Application under comparison
  #[serde(skip_serializing_if = "Option::is_none")]
  pub app: Option<String>,
}

/// One category row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
  pub category: Category,
  pub label: String,
  pub in_aggregate: bool,
  pub overlap: usize,
  pub manual_total: usize,
  pub inferred_total: usize,
  #[serde(default)]
  pub matched: Vec<String>,
}

/// Complete comparison report in JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
  pub metadata: ReportMetadata,
  pub categories: Vec<CategoryReport>,
  pub aggregate: Aggregate,
  /// Same text as the summary file
  pub summary: String,
}

impl ComparisonReport {
  /// Build a report. Fails when the aggregate is undefined.
  pub fn from_comparison(comparison: &Comparison, app: Option<&str>) -> Result<Self> {
    let aggregate = comparison.aggregate()?;
    let summary = comparison.summary_line()?;

    let categories = Category::ALL
      .into_iter()
      .map(|category| {
        let result = comparison.get(category);
        CategoryReport {
          category,
          label: category.label().to_string(),
          in_aggregate: category.in_aggregate(),
          overlap: result.overlap,
          manual_total: result.manual_total,
          inferred_total: result.inferred_total,
          matched: result.matched,
        }
      })
      .collect();

    Ok(Self {
      metadata: ReportMetadata {
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        app: app.map(String::from),
      },
      categories,
      aggregate,
      summary,
    })
  }

  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Save as pretty JSON.
  pub fn save(&self, path: &Path) -> Result<()> {
    let content = self.to_json()?;
    write_creating_parent(path, &content)
  }
}

/// Write the summary line (newline-terminated), creating parent directories.
pub fn write_summary(path: &Path, summary: &str) -> Result<()> {
  write_creating_parent(path, &format!("{summary}\n"))
}

fn write_creating_parent(path: &Path, content: &str) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent).map_err(|e| AnnocmpError::io(parent, e))?;
  }
  std::fs::write(path, content).map_err(|e| AnnocmpError::io(path, e))
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;
  use crate::scoring::ComparisonResult;

  fn sample() -> Comparison {
    let mut comparison = Comparison::default();
    comparison.results.insert(
      Category::OwningParameter,
      ComparisonResult {
        overlap: 1,
        manual_total: 2,
        inferred_total: 3,
        matched: vec!["x.Owning.Parameter".to_string()],
      },
    );
    comparison
  }

  #[test]
  fn test_report_lists_all_categories() {
    let report = ComparisonReport::from_comparison(&sample(), Some("lucene-db")).unwrap();

    assert_eq!(report.categories.len(), 10);
    assert_eq!(report.aggregate.percent, 50);
    assert_eq!(report.summary, "0/0, 0/0, 1/2, 0/0, 0/0, 0/0, 0/0, 50%");
    let param = &report.categories[2];
    assert_eq!(param.category, Category::OwningParameter);
    assert_eq!(param.label, "@Owning Parameters");
    assert_eq!(param.matched.len(), 1);
  }

  #[test]
  fn test_report_requires_manual_annotations() {
    let err = ComparisonReport::from_comparison(&Comparison::default(), None).unwrap_err();
    assert!(matches!(err, AnnocmpError::NoManualAnnotations));
  }

  #[test]
  fn test_save_and_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("report.json");

    let report = ComparisonReport::from_comparison(&sample(), None).unwrap();
    report.save(&path).unwrap();

    let loaded: ComparisonReport = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.summary, report.summary);
    assert_eq!(loaded.categories[2].inferred_total, 3);
    assert!(loaded.metadata.app.is_none());
  }

  #[test]
  fn test_write_summary_appends_newline() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out").join("app-attr-cmp.txt");

    write_summary(&path, "1/2, 50%").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1/2, 50%\n");
  }
}
