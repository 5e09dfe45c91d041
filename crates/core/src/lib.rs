//! Ownership Annotation Comparison Engine
//!
//! Compares a manually written corpus of resource/ownership annotations against
//! the corpus produced by an inference pass, and reports per category how many
//! inferred annotations exactly match the manual ground truth.
//!
//! ## Key Concepts
//!
//! - **Records**: one annotation per line, fields joined by a literal delimiter
//! - **Field facts**: a third file flagging fields that are assigned exactly once
//! - **Taxonomy**: ten keyword-defined categories (owning fields, MustCall, ...)
//! - **Scoring**: deduplicated overlap per category plus an aggregate percentage

use std::path::PathBuf;

pub mod compare;
pub mod config;
pub mod field_facts;
pub mod record;
pub mod report;
pub mod scoring;
pub mod taxonomy;

pub use compare::{ComparisonInputs, run_comparison};
pub use config::{Config, LayoutConfig, TotalsPolicy};
pub use field_facts::{ReadonlyFieldSet, readonly_fields, readonly_fields_nested};
pub use record::{AnnotationRecord, RecordFormat, parse_file};
pub use report::{ComparisonReport, write_summary};
pub use scoring::{Aggregate, Comparison, ComparisonResult, Score, score};
pub use taxonomy::{Category, KeywordRule, Partition, PartitionStrategy, RuleTarget, Taxonomy, classify};

use thiserror::Error;

/// Comparison errors. Every one of them is fatal to a run.
#[derive(Debug, Error)]
pub enum AnnocmpError {
  #[error("No manual annotations available: {0} does not exist")]
  MissingManual(PathBuf),

  #[error("No inferred annotations available: {0} does not exist")]
  MissingInferred(PathBuf),

  #[error("File not found: {0}")]
  NotFound(PathBuf),

  #[error("IO error on {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Malformed record at {path}:{line}: {content:?}")]
  MalformedRecord { path: PathBuf, line: usize, content: String },

  #[error("No manual annotations in the aggregate categories; percentage is undefined")]
  NoManualAnnotations,

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("TOML parse error: {0}")]
  Toml(#[from] toml::de::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

impl AnnocmpError {
  /// Wrap an IO error with the path it happened on. Missing files map to `NotFound`.
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    let path = path.into();
    if source.kind() == std::io::ErrorKind::NotFound {
      Self::NotFound(path)
    } else {
      Self::Io { path, source }
    }
  }
}

pub type Result<T> = std::result::Result<T, AnnocmpError>;
