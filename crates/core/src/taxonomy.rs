//! Annotation categories and keyword classification.
//!
//! A rule matches a record when every include group contributes at least one
//! substring hit on the rendered line and no exclude keyword occurs in it.
//! Nine rules produce ten categories: the owning-field rule is split into final
//! and non-final fields by membership in the [`ReadonlyFieldSet`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::field_facts::ReadonlyFieldSet;
use crate::record::AnnotationRecord;

/// Literal markers found in the annotation text.
pub mod keywords {
  pub const OWNING: &str = "Owning";
  pub const NON_OWNING: &str = "NonOwning";
  pub const FIELD: &str = "Field\"";
  pub const PROPERTY: &str = "Property";
  pub const PARAMETER: &str = "Parameter";
  pub const METHOD: &str = "Method";
  pub const ENSURES_CALLED_METHODS: &str = "EnsuresCalledMethods";
  pub const CREATE_MUST_CALL_FOR: &str = "CreateMustCallFor";
  pub const MUST_CALL_TERMINAL: &str = "MustCall\"";
  pub const MUST_CALL_ALIAS: &str = "MustCallAlias";
  pub const MUST_CALL: &str = "MustCall";
}

use keywords::*;

// ============================================================================
// Categories
// ============================================================================

/// The ten comparison categories, declared in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
  FinalOwningField,
  NonFinalOwningField,
  OwningParameter,
  MustCallAlias,
  EnsuresCalledMethods,
  MustCall,
  NonOwningMethod,
  OwningMethod,
  CreateMustCallFor,
  MustCallTerminal,
}

impl Category {
  /// All categories in report order; the aggregate categories come first.
  pub const ALL: [Category; 10] = [
    Category::FinalOwningField,
    Category::NonFinalOwningField,
    Category::OwningParameter,
    Category::MustCallAlias,
    Category::EnsuresCalledMethods,
    Category::MustCall,
    Category::NonOwningMethod,
    Category::OwningMethod,
    Category::CreateMustCallFor,
    Category::MustCallTerminal,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Category::FinalOwningField => "final-owning-field",
      Category::NonFinalOwningField => "non-final-owning-field",
      Category::OwningParameter => "owning-parameter",
      Category::MustCallAlias => "must-call-alias",
      Category::EnsuresCalledMethods => "ensures-called-methods",
      Category::MustCall => "must-call",
      Category::NonOwningMethod => "non-owning-method",
      Category::OwningMethod => "owning-method",
      Category::CreateMustCallFor => "create-must-call-for",
      Category::MustCallTerminal => "must-call-terminal",
    }
  }

  /// Column heading used in the published result tables.
  pub fn label(self) -> &'static str {
    match self {
      Category::FinalOwningField => "@Owning Final Fields",
      Category::NonFinalOwningField => "@Owning Non-Final Fields",
      Category::OwningParameter => "@Owning Parameters",
      Category::MustCallAlias => "@MustCallAlias",
      Category::EnsuresCalledMethods => "@Calls",
      Category::MustCall => "@MustCall on Class",
      Category::NonOwningMethod => "@Not Owning",
      Category::OwningMethod => "@Owning Methods",
      Category::CreateMustCallFor => "@CreateMustCallFor",
      Category::MustCallTerminal => "@MustCall",
    }
  }

  /// Whether the category counts toward the aggregate percentage.
  pub fn in_aggregate(self) -> bool {
    match self {
      Category::FinalOwningField
      | Category::NonFinalOwningField
      | Category::OwningParameter
      | Category::MustCallAlias
      | Category::EnsuresCalledMethods
      | Category::MustCall
      | Category::NonOwningMethod => true,
      Category::OwningMethod | Category::CreateMustCallFor | Category::MustCallTerminal => false,
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| c.name() == name)
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ============================================================================
// Keyword predicate
// ============================================================================

fn matches_keywords(text: &str, include: &[&[&str]], exclude: &[&str]) -> bool {
  include.iter().all(|group| group.iter().any(|kw| text.contains(kw))) && !exclude.iter().any(|kw| text.contains(kw))
}

/// Order-preserving filter: records whose line satisfies every include group and no exclude keyword.
pub fn classify<'a>(records: &'a [AnnotationRecord], include: &[&[&str]], exclude: &[&str]) -> Vec<&'a AnnotationRecord> {
  records
    .iter()
    .filter(|record| matches_keywords(record.text(), include, exclude))
    .collect()
}

// ============================================================================
// Rules
// ============================================================================

/// Where a rule's matches land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTarget {
  Single(Category),
  /// Final vs non-final owning field, decided by the read-only field set.
  SplitByReadonly,
}

impl RuleTarget {
  pub fn categories(self) -> Vec<Category> {
    match self {
      RuleTarget::Single(category) => vec![category],
      RuleTarget::SplitByReadonly => vec![Category::FinalOwningField, Category::NonFinalOwningField],
    }
  }

  fn resolve(self, record: &AnnotationRecord, readonly: &ReadonlyFieldSet) -> Category {
    match self {
      RuleTarget::Single(category) => category,
      RuleTarget::SplitByReadonly if readonly.contains(record) => Category::FinalOwningField,
      RuleTarget::SplitByReadonly => Category::NonFinalOwningField,
    }
  }
}

/// One keyword classification rule.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordRule {
  pub name: &'static str,
  pub include: &'static [&'static [&'static str]],
  pub exclude: &'static [&'static str],
  pub target: RuleTarget,
}

impl KeywordRule {
  pub fn matches(&self, record: &AnnotationRecord) -> bool {
    matches_keywords(record.text(), self.include, self.exclude)
  }
}

/// How records are distributed over rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionStrategy {
  /// Every rule filters the whole stream; a record may land in several categories.
  #[default]
  Independent,
  /// Each record lands in the first matching rule in priority order. Keywords
  /// in file paths or names (`Method` in `MethodCache.cs`) can move a record
  /// out of the category the independent filters would count it in.
  FirstMatch,
}

/// The fixed rule set, narrowest rules first.
const STANDARD_RULES: &[KeywordRule] = &[
  KeywordRule {
    name: "non-owning-method",
    include: &[&[NON_OWNING], &[METHOD]],
    exclude: &[],
    target: RuleTarget::Single(Category::NonOwningMethod),
  },
  KeywordRule {
    name: "create-must-call-for",
    include: &[&[CREATE_MUST_CALL_FOR], &[METHOD]],
    exclude: &[],
    target: RuleTarget::Single(Category::CreateMustCallFor),
  },
  KeywordRule {
    name: "must-call-alias",
    include: &[&[MUST_CALL_ALIAS]],
    exclude: &[],
    target: RuleTarget::Single(Category::MustCallAlias),
  },
  KeywordRule {
    name: "must-call-terminal",
    include: &[&[MUST_CALL_TERMINAL]],
    exclude: &[],
    target: RuleTarget::Single(Category::MustCallTerminal),
  },
  KeywordRule {
    name: "ensures-called-methods",
    include: &[&[ENSURES_CALLED_METHODS], &[METHOD]],
    exclude: &[],
    target: RuleTarget::Single(Category::EnsuresCalledMethods),
  },
  KeywordRule {
    name: "owning-method",
    include: &[&[OWNING], &[METHOD]],
    exclude: &[NON_OWNING],
    target: RuleTarget::Single(Category::OwningMethod),
  },
  KeywordRule {
    name: "owning-parameter",
    include: &[&[OWNING], &[PARAMETER]],
    exclude: &[],
    target: RuleTarget::Single(Category::OwningParameter),
  },
  KeywordRule {
    name: "owning-field",
    include: &[&[OWNING], &[FIELD, PROPERTY]],
    exclude: &[],
    target: RuleTarget::SplitByReadonly,
  },
  KeywordRule {
    name: "must-call",
    include: &[&[MUST_CALL]],
    exclude: &[MUST_CALL_TERMINAL, MUST_CALL_ALIAS, CREATE_MUST_CALL_FOR],
    target: RuleTarget::Single(Category::MustCall),
  },
];

/// Priority-ordered rule list.
#[derive(Debug, Clone)]
pub struct Taxonomy {
  rules: Vec<KeywordRule>,
}

impl Default for Taxonomy {
  fn default() -> Self {
    Self::standard()
  }
}

impl Taxonomy {
  pub fn standard() -> Self {
    Self {
      rules: STANDARD_RULES.to_vec(),
    }
  }

  pub fn rules(&self) -> &[KeywordRule] {
    &self.rules
  }

  /// First rule, in priority order, that claims the record.
  pub fn first_match(&self, record: &AnnotationRecord) -> Option<&KeywordRule> {
    self.rules.iter().find(|rule| rule.matches(record))
  }

  /// Distribute records into the ten category buckets.
  pub fn partition<'a>(
    &self,
    records: &'a [AnnotationRecord],
    readonly: &ReadonlyFieldSet,
    strategy: PartitionStrategy,
  ) -> Partition<'a> {
    let mut partition = Partition::empty();

    match strategy {
      PartitionStrategy::FirstMatch => {
        for record in records {
          match self.first_match(record) {
            Some(rule) => partition.push(rule.target.resolve(record, readonly), record),
            None => partition.unclassified += 1,
          }
        }
      }
      PartitionStrategy::Independent => {
        for rule in &self.rules {
          for record in classify(records, rule.include, rule.exclude) {
            partition.push(rule.target.resolve(record, readonly), record);
          }
        }
        partition.unclassified = records.iter().filter(|r| self.first_match(r).is_none()).count();
      }
    }

    debug!(
      "Partitioned {} records ({:?}): {} unclassified",
      records.len(),
      strategy,
      partition.unclassified
    );
    partition
  }
}

// ============================================================================
// Partition
// ============================================================================

/// Records grouped by category. Every category is present, possibly empty.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
  buckets: BTreeMap<Category, Vec<&'a AnnotationRecord>>,
  unclassified: usize,
}

impl<'a> Partition<'a> {
  fn empty() -> Self {
    Self {
      buckets: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
      unclassified: 0,
    }
  }

  fn push(&mut self, category: Category, record: &'a AnnotationRecord) {
    self.buckets.entry(category).or_default().push(record);
  }

  pub fn get(&self, category: Category) -> &[&'a AnnotationRecord] {
    self.buckets.get(&category).map(Vec::as_slice).unwrap_or_default()
  }

  /// Records that matched no rule.
  pub fn unclassified(&self) -> usize {
    self.unclassified
  }

  pub fn iter(&self) -> impl Iterator<Item = (Category, &[&'a AnnotationRecord])> {
    self.buckets.iter().map(|(c, v)| (*c, v.as_slice()))
  }
}
