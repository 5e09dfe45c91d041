//! The `config` commands

use annocmp_core::Config;
use anyhow::{Context, Result, bail};
use std::path::Path;

use super::resolve_config;

/// Write the default template to `.annocmp.toml` in the current directory
pub fn cmd_config_init(force: bool) -> Result<()> {
  let cwd = std::env::current_dir()?;
  let config_path = Config::project_config_path(&cwd);

  if config_path.exists() && !force {
    bail!(
      "Config file already exists: {}. Use --force to overwrite",
      config_path.display()
    );
  }

  std::fs::write(&config_path, Config::generate_template())
    .with_context(|| format!("Failed to write {}", config_path.display()))?;

  println!("Created project config: {}", config_path.display());
  println!("Edit the file to customize settings.");

  Ok(())
}

/// Print the effective configuration and where it came from
pub fn cmd_config_show(explicit: Option<&Path>) -> Result<()> {
  let cwd = std::env::current_dir()?;
  let config = resolve_config(explicit)?;

  let project_config = Config::project_config_path(&cwd);
  let user_config = Config::user_config_path();

  if let Some(path) = explicit {
    println!("# Using config: {}", path.display());
  } else if project_config.exists() {
    println!("# Using project config: {}", project_config.display());
  } else if let Some(user_path) = user_config.filter(|p| p.exists()) {
    println!("# Using user config: {}", user_path.display());
  } else {
    println!("# Using default configuration (no config file found)");
  }
  println!();

  println!("{}", toml::to_string_pretty(&config)?);

  Ok(())
}
