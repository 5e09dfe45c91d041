//! Command implementations

mod categories;
mod compare;
mod config;

pub use categories::cmd_categories;
pub use compare::{CompareArgs, cmd_compare};
pub use config::{cmd_config_init, cmd_config_show};

use annocmp_core::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Explicit `--config` must load; otherwise fall back through project, user, defaults.
pub(crate) fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
  match explicit {
    Some(path) => Config::load(path).with_context(|| format!("Failed to load config {}", path.display())),
    None => {
      let cwd = std::env::current_dir().context("Failed to read current directory")?;
      Ok(Config::load_for_project(&cwd))
    }
  }
}
