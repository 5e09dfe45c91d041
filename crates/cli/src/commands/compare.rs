//! The `compare` command

use annocmp_core::{Category, ComparisonInputs, ComparisonReport, Config, run_comparison, write_summary};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::info;

use super::resolve_config;

/// Arguments for one comparison run
pub struct CompareArgs {
  pub app: Option<String>,
  pub db: Option<PathBuf>,
  pub manual: Option<PathBuf>,
  pub inferred: Option<PathBuf>,
  pub field_info: Option<PathBuf>,
  pub output: Option<PathBuf>,
  pub json: bool,
  pub show_matches: bool,
}

impl CompareArgs {
  /// Application name from `--app`, or the final component of `--db`.
  fn app_name(&self) -> Result<Option<String>> {
    if let Some(app) = &self.app {
      return Ok(Some(app.clone()));
    }
    let Some(db) = &self.db else {
      return Ok(None);
    };
    match db.file_name().and_then(|name| name.to_str()) {
      Some(name) => Ok(Some(name.to_string())),
      None => bail!("Cannot derive an application name from {}", db.display()),
    }
  }
}

/// Resolved file locations for a run
#[derive(Debug)]
struct RunPaths {
  inputs: ComparisonInputs,
  output: Option<PathBuf>,
}

fn resolve_paths(args: &CompareArgs, app: Option<&str>, config: &Config) -> Result<RunPaths> {
  let layout = &config.layout;

  let manual = match (&args.manual, app) {
    (Some(path), _) => path.clone(),
    (None, Some(app)) => layout.manual_path(app),
    (None, None) => bail!("--manual is required without --app or --db"),
  };
  let inferred = match (&args.inferred, app) {
    (Some(path), _) => path.clone(),
    (None, Some(app)) => layout.inferred_path(app),
    (None, None) => bail!("--inferred is required without --app or --db"),
  };

  let mut inputs = ComparisonInputs::new(manual, inferred);
  let field_info = args.field_info.clone().or_else(|| app.map(|app| layout.field_info_path(app)));
  if let Some(path) = field_info {
    inputs = inputs.with_field_info(path);
  }

  let output = args.output.clone().or_else(|| app.map(|app| layout.output_path(app)));

  Ok(RunPaths { inputs, output })
}

/// Compare one application's corpora and publish the summary
pub fn cmd_compare(args: CompareArgs, config_path: Option<&Path>) -> Result<()> {
  let config = resolve_config(config_path)?;
  let app = args.app_name()?;
  let paths = resolve_paths(&args, app.as_deref(), &config)?;

  let comparison = run_comparison(&paths.inputs, &config).context("Comparison failed")?;
  let report = ComparisonReport::from_comparison(&comparison, app.as_deref()).context("Comparison failed")?;

  if args.show_matches {
    for category in Category::ALL {
      let result = comparison.get(category);
      info!("{} ({}):", category.label(), result.ratio());
      for line in &result.matched {
        info!("  {}", line);
      }
    }
  }

  // Nothing is written until every step above has succeeded.
  if let Some(output) = &paths.output {
    write_summary(output, &report.summary)
      .with_context(|| format!("Failed to write summary to {}", output.display()))?;
    info!("Summary written to {}", output.display());
  }

  if args.json {
    println!("{}", report.to_json()?);
  } else {
    println!("{}", report.summary);
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args() -> CompareArgs {
    CompareArgs {
      app: None,
      db: None,
      manual: None,
      inferred: None,
      field_info: None,
      output: None,
      json: false,
      show_matches: false,
    }
  }

  #[test]
  fn test_app_name_from_db_basename() {
    let args = CompareArgs {
      db: Some(PathBuf::from("/data/dbs/lucene-db")),
      ..args()
    };
    assert_eq!(args.app_name().unwrap().as_deref(), Some("lucene-db"));
  }

  #[test]
  fn test_layout_paths_for_app() {
    let config = Config::default();
    let paths = resolve_paths(&args(), Some("lucene"), &config).unwrap();

    assert_eq!(paths.inputs.manual, PathBuf::from("./docs/lucene-manual-attributes.csv"));
    assert_eq!(
      paths.inputs.inferred,
      PathBuf::from("./csharp-results/inference/lucene-inferred-attributes.csv")
    );
    assert_eq!(
      paths.inputs.field_info,
      Some(PathBuf::from("./docs/lucene-field-info.csv"))
    );
    assert_eq!(
      paths.output,
      Some(PathBuf::from("./csharp-results/attr-compare/lucene-attr-cmp.txt"))
    );
  }

  #[test]
  fn test_explicit_paths_override_layout() {
    let args = CompareArgs {
      manual: Some(PathBuf::from("m.csv")),
      output: Some(PathBuf::from("out.txt")),
      ..args()
    };
    let paths = resolve_paths(&args, Some("lucene"), &Config::default()).unwrap();

    assert_eq!(paths.inputs.manual, PathBuf::from("m.csv"));
    assert_eq!(paths.output, Some(PathBuf::from("out.txt")));
  }

  #[test]
  fn test_explicit_paths_required_without_app() {
    let args = CompareArgs {
      manual: Some(PathBuf::from("m.csv")),
      ..args()
    };
    let err = resolve_paths(&args, None, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("--inferred"));

    let args = CompareArgs {
      manual: Some(PathBuf::from("m.csv")),
      inferred: Some(PathBuf::from("i.csv")),
      ..self::args()
    };
    let paths = resolve_paths(&args, None, &Config::default()).unwrap();
    assert!(paths.inputs.field_info.is_none());
    assert!(paths.output.is_none());
  }
}
