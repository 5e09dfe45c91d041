//! Overlap scoring between the manual and inferred corpora.
//!
//! Overlap is counted on deduplicated lines. The manual total defaults to the
//! raw bucket size (duplicates included) so that figures stay comparable with
//! previously published results; see [`TotalsPolicy`].

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::record::AnnotationRecord;
use crate::taxonomy::{Category, Partition};
use crate::{AnnocmpError, Result};

/// Overlap between two buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
  pub overlap: usize,
  /// Lines present in both buckets, sorted.
  pub intersection: Vec<String>,
}

/// Deduplicate both buckets and intersect them.
pub fn score(manual: &[&AnnotationRecord], inferred: &[&AnnotationRecord]) -> Score {
  let manual: HashSet<&str> = manual.iter().map(|r| r.text()).collect();
  let inferred: HashSet<&str> = inferred.iter().map(|r| r.text()).collect();

  let intersection: BTreeSet<&str> = manual.intersection(&inferred).copied().collect();
  Score {
    overlap: intersection.len(),
    intersection: intersection.into_iter().map(String::from).collect(),
  }
}

/// How the per-category manual total is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TotalsPolicy {
  /// Every manual line, duplicates included.
  #[default]
  Raw,
  /// Distinct manual lines, matching how overlap is counted.
  Distinct,
}

impl TotalsPolicy {
  fn count(self, bucket: &[&AnnotationRecord]) -> usize {
    match self {
      TotalsPolicy::Raw => bucket.len(),
      TotalsPolicy::Distinct => bucket.iter().map(|r| r.text()).collect::<HashSet<_>>().len(),
    }
  }
}

/// Result for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
  /// Distinct lines found in both corpora
  pub overlap: usize,
  /// Manual lines in the category (counted per [`TotalsPolicy`])
  pub manual_total: usize,
  /// Inferred lines in the category, duplicates included
  pub inferred_total: usize,
  /// Sorted matching lines
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub matched: Vec<String>,
}

impl ComparisonResult {
  /// `overlap/manual_total`
  pub fn ratio(&self) -> String {
    format!("{}/{}", self.overlap, self.manual_total)
  }
}

/// Totals over the aggregate categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
  pub overlap: usize,
  pub manual_total: usize,
  /// floor(100 * overlap / manual_total)
  pub percent: usize,
}

/// Per-category results for one application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comparison {
  pub results: BTreeMap<Category, ComparisonResult>,
}

impl Comparison {
  /// Score every category of the two partitions.
  pub fn from_partitions(manual: &Partition<'_>, inferred: &Partition<'_>, totals: TotalsPolicy) -> Self {
    let results = Category::ALL
      .into_iter()
      .map(|category| {
        let manual_bucket = manual.get(category);
        let inferred_bucket = inferred.get(category);
        let Score { overlap, intersection } = score(manual_bucket, inferred_bucket);
        let result = ComparisonResult {
          overlap,
          manual_total: totals.count(manual_bucket),
          inferred_total: inferred_bucket.len(),
          matched: intersection,
        };
        (category, result)
      })
      .collect();
    Self { results }
  }

  /// Result for a category; zero counts if the category was never scored.
  pub fn get(&self, category: Category) -> ComparisonResult {
    self.results.get(&category).cloned().unwrap_or_default()
  }

  /// Sum the aggregate categories. Fails if they contain no manual annotations.
  pub fn aggregate(&self) -> Result<Aggregate> {
    let (overlap, manual_total) = self
      .results
      .iter()
      .filter(|(category, _)| category.in_aggregate())
      .fold((0, 0), |(o, m), (_, r)| (o + r.overlap, m + r.manual_total));

    if manual_total == 0 {
      return Err(AnnocmpError::NoManualAnnotations);
    }

    Ok(Aggregate {
      overlap,
      manual_total,
      percent: overlap * 100 / manual_total,
    })
  }

  /// `a/b, c/d, e/f, g/h, i/j, k/l, m/n, p%` over the aggregate categories in report order.
  pub fn summary_line(&self) -> Result<String> {
    let aggregate = self.aggregate()?;
    let mut parts: Vec<String> = Category::ALL
      .into_iter()
      .filter(|c| c.in_aggregate())
      .map(|c| self.get(c).ratio())
      .collect();
    parts.push(format!("{}%", aggregate.percent));
    Ok(parts.join(", "))
  }
}
