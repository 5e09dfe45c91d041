//! One comparison run: preconditions, parse, read-only join, classify, score.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::field_facts::{ReadonlyFieldSet, readonly_fields};
use crate::record::{AnnotationRecord, parse_file};
use crate::scoring::Comparison;
use crate::taxonomy::Taxonomy;
use crate::{AnnocmpError, Result};

/// The file triple for one application.
#[derive(Debug, Clone)]
pub struct ComparisonInputs {
  pub manual: PathBuf,
  pub inferred: PathBuf,
  /// Without field facts every owning field counts as non-final.
  pub field_info: Option<PathBuf>,
}

impl ComparisonInputs {
  pub fn new(manual: impl Into<PathBuf>, inferred: impl Into<PathBuf>) -> Self {
    Self {
      manual: manual.into(),
      inferred: inferred.into(),
      field_info: None,
    }
  }

  pub fn with_field_info(mut self, path: impl Into<PathBuf>) -> Self {
    self.field_info = Some(path.into());
    self
  }

  /// Both annotation corpora must exist before anything is parsed.
  pub fn check(&self) -> Result<()> {
    if !self.manual.is_file() {
      return Err(AnnocmpError::MissingManual(self.manual.clone()));
    }
    if !self.inferred.is_file() {
      return Err(AnnocmpError::MissingInferred(self.inferred.clone()));
    }
    Ok(())
  }
}

/// Run a full comparison for one application.
pub fn run_comparison(inputs: &ComparisonInputs, config: &Config) -> Result<Comparison> {
  inputs.check()?;
  config.validate()?;

  let format = config.format.record_format();
  let manual = parse_file(&inputs.manual, &format)?;
  let inferred = parse_file(&inputs.inferred, &format)?;

  let readonly = match &inputs.field_info {
    Some(path) => load_readonly_fields(path, &manual, config)?,
    None => {
      warn!("No field-info file given; all owning fields are counted as non-final");
      ReadonlyFieldSet::empty()
    }
  };

  let taxonomy = Taxonomy::standard();
  let strategy = config.classification.strategy;
  let manual_partition = taxonomy.partition(&manual, &readonly, strategy);
  let inferred_partition = taxonomy.partition(&inferred, &readonly, strategy);

  for (category, bucket) in manual_partition.iter() {
    debug!(
      "{}: {} manual, {} inferred",
      category,
      bucket.len(),
      inferred_partition.get(category).len()
    );
  }

  let comparison = Comparison::from_partitions(&manual_partition, &inferred_partition, config.scoring.totals);
  info!(
    "Compared {} manual and {} inferred annotations ({} read-only fields)",
    manual.len(),
    inferred.len(),
    readonly.len()
  );
  Ok(comparison)
}

fn load_readonly_fields(path: &Path, manual: &[AnnotationRecord], config: &Config) -> Result<ReadonlyFieldSet> {
  let facts = parse_file(path, &config.format.record_format())?;
  Ok(readonly_fields(manual, &facts, &config.format.readonly_sentinel))
}
