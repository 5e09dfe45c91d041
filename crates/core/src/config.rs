//! Configuration for annocmp.
//!
//! Config priority: explicit path > project (.annocmp.toml) > user (~/.config/annocmp/config.toml) > defaults

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::field_facts::READONLY_SENTINEL;
use crate::record::{DEFAULT_DELIMITER, RecordFormat};
use crate::taxonomy::PartitionStrategy;
use crate::{AnnocmpError, Result};

pub use crate::scoring::TotalsPolicy;

/// Project-relative config file name
pub const PROJECT_CONFIG_FILE: &str = ".annocmp.toml";

// ============================================================================
// Sections
// ============================================================================

/// Line format shared by the manual, inferred and field-fact files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
  /// Literal token separating fields on a line
  pub delimiter: String,

  /// Field-fact value marking a field assigned exactly once
  pub readonly_sentinel: String,
}

impl Default for FormatConfig {
  fn default() -> Self {
    Self {
      delimiter: DEFAULT_DELIMITER.to_string(),
      readonly_sentinel: READONLY_SENTINEL.to_string(),
    }
  }
}

impl FormatConfig {
  pub fn record_format(&self) -> RecordFormat {
    RecordFormat::new(self.delimiter.clone())
  }
}

/// Classification settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClassificationConfig {
  /// independent: every rule sees every line; first-match: one category per line
  pub strategy: PartitionStrategy,
}

/// Scoring settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
  /// raw: manual totals include duplicate lines; distinct: they do not
  pub totals: TotalsPolicy,
}

/// Where per-application files live, relative to `data_root`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
  pub data_root: PathBuf,
  pub manual_dir: PathBuf,
  pub field_info_dir: PathBuf,
  pub inferred_dir: PathBuf,
  pub output_dir: PathBuf,
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      data_root: PathBuf::from("."),
      manual_dir: PathBuf::from("docs"),
      field_info_dir: PathBuf::from("docs"),
      inferred_dir: PathBuf::from("csharp-results/inference"),
      output_dir: PathBuf::from("csharp-results/attr-compare"),
    }
  }
}

impl LayoutConfig {
  pub fn manual_path(&self, app: &str) -> PathBuf {
    self
      .data_root
      .join(&self.manual_dir)
      .join(format!("{app}-manual-attributes.csv"))
  }

  pub fn field_info_path(&self, app: &str) -> PathBuf {
    self
      .data_root
      .join(&self.field_info_dir)
      .join(format!("{app}-field-info.csv"))
  }

  pub fn inferred_path(&self, app: &str) -> PathBuf {
    self
      .data_root
      .join(&self.inferred_dir)
      .join(format!("{app}-inferred-attributes.csv"))
  }

  pub fn output_path(&self, app: &str) -> PathBuf {
    self.data_root.join(&self.output_dir).join(format!("{app}-attr-cmp.txt"))
  }
}

// ============================================================================
// Config
// ============================================================================

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
  /// Record line format
  #[serde(default)]
  pub format: FormatConfig,

  /// Category assignment
  #[serde(default)]
  pub classification: ClassificationConfig,

  /// Totals policy
  #[serde(default)]
  pub scoring: ScoringConfig,

  /// Per-application file layout
  #[serde(default)]
  pub layout: LayoutConfig,
}

impl Config {
  /// Load a config file. Errors propagate.
  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path).map_err(|e| AnnocmpError::io(path, e))?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Load the project config, falling back to the user config, then defaults.
  /// Unreadable or invalid implicit files are skipped.
  pub fn load_for_project(project_path: &Path) -> Self {
    let candidates = std::iter::once(Self::project_config_path(project_path)).chain(Self::user_config_path());

    for path in candidates {
      if !path.exists() {
        continue;
      }
      match Self::load(&path) {
        Ok(config) => {
          debug!("Loaded config from {}", path.display());
          return config;
        }
        Err(e) => warn!("Ignoring config {}: {}", path.display(), e),
      }
    }

    Self::default()
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("ANNOCMP_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("annocmp").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("annocmp").join("config.toml"))
  }

  /// Get the project-relative config path
  pub fn project_config_path(project_path: &Path) -> PathBuf {
    project_path.join(PROJECT_CONFIG_FILE)
  }

  pub fn validate(&self) -> Result<()> {
    if self.format.delimiter.is_empty() {
      return Err(AnnocmpError::Config("format.delimiter must not be empty".to_string()));
    }
    if self.format.readonly_sentinel.is_empty() {
      return Err(AnnocmpError::Config(
        "format.readonly_sentinel must not be empty".to_string(),
      ));
    }
    Ok(())
  }

  /// Generate a default config file as a string
  pub fn generate_template() -> String {
    let defaults = Self::default();
    format!(
      r#"# annocmp configuration
# Project: {project}  User: ~/.config/annocmp/config.toml

[format]
# Literal token separating fields on each line (no escaping)
delimiter = {delimiter:?}
# Trailing field-fact value for fields assigned exactly once
readonly_sentinel = {sentinel:?}

[classification]
# "independent": every category filters all lines on its own
# "first-match": each line counts in at most one category (narrowest rule wins)
strategy = "independent"

[scoring]
# "raw": manual totals count duplicate lines (matches published figures)
# "distinct": manual totals count distinct lines, like the overlap
totals = "raw"

[layout]
data_root = "."
manual_dir = "docs"
field_info_dir = "docs"
inferred_dir = "csharp-results/inference"
output_dir = "csharp-results/attr-compare"
"#,
      project = PROJECT_CONFIG_FILE,
      delimiter = defaults.format.delimiter,
      sentinel = defaults.format.readonly_sentinel,
    )
  }
}
