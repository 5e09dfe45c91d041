//! Read-only field detection.
//!
//! The field-fact file shares the record shape of the manual corpus. A manual
//! record is a read-only ("final") field when some field fact with the same
//! identity prefix carries the read-only sentinel as its value.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::record::AnnotationRecord;

/// Value emitted by the field-fact producer for fields assigned exactly once.
pub const READONLY_SENTINEL: &str = r#" type = "OnlyRead")"#;

/// Manual records whose field is proven read-only. Built once per run.
#[derive(Debug, Clone, Default)]
pub struct ReadonlyFieldSet {
  records: HashSet<AnnotationRecord>,
}

impl ReadonlyFieldSet {
  /// Empty set: every owning field is treated as non-final.
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn contains(&self, record: &AnnotationRecord) -> bool {
    self.records.contains(record)
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &AnnotationRecord> {
    self.records.iter()
  }
}

impl FromIterator<AnnotationRecord> for ReadonlyFieldSet {
  fn from_iter<I: IntoIterator<Item = AnnotationRecord>>(iter: I) -> Self {
    Self {
      records: iter.into_iter().collect(),
    }
  }
}

/// Hash join of manual records against read-only field facts, keyed on the identity prefix.
pub fn readonly_fields(manual: &[AnnotationRecord], field_facts: &[AnnotationRecord], sentinel: &str) -> ReadonlyFieldSet {
  let readonly_keys: HashSet<&[String]> = field_facts
    .iter()
    .filter(|fact| fact.value() == sentinel)
    .map(|fact| fact.identity_prefix())
    .collect();

  let set: ReadonlyFieldSet = manual
    .iter()
    .filter(|record| readonly_keys.contains(record.identity_prefix()))
    .cloned()
    .collect();

  debug!(
    "{} read-only field facts matched {} of {} manual records",
    readonly_keys.len(),
    set.len(),
    manual.len()
  );
  if set.is_empty() && !readonly_keys.is_empty() {
    warn!(
      "Field-fact file flags {} read-only fields but none share an identity prefix with the manual annotations; \
       check that both files use the same field layout",
      readonly_keys.len()
    );
  }

  set
}

/// Nested-loop form of [`readonly_fields`]. Same result, O(manual × facts).
pub fn readonly_fields_nested(
  manual: &[AnnotationRecord],
  field_facts: &[AnnotationRecord],
  sentinel: &str,
) -> ReadonlyFieldSet {
  manual
    .iter()
    .filter(|record| {
      field_facts
        .iter()
        .any(|fact| record.identity_prefix() == fact.identity_prefix() && fact.value() == sentinel)
    })
    .cloned()
    .collect()
}
