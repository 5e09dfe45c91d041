//! annocmp - compare manual and inferred ownership annotations

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;

use commands::{CompareArgs, cmd_categories, cmd_compare, cmd_config_init, cmd_config_show};
use logging::init_cli_logging;

#[derive(Parser)]
#[command(name = "annocmp")]
#[command(about = "Compare inferred resource-ownership annotations against a manual ground truth")]
#[command(version)]
#[command(after_help = "\
EXAMPLES:
  annocmp compare --db ~/dbs/lucene-db           # Use the configured data layout
  annocmp compare --manual m.csv --inferred i.csv --field-info f.csv
  annocmp categories                             # Show the keyword rules")]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Config file (default: .annocmp.toml, then ~/.config/annocmp/config.toml)
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

/// Subcommands for `annocmp config`
#[derive(Subcommand)]
enum ConfigCommand {
  /// Write a default .annocmp.toml in the current directory
  Init {
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
  },
  /// Print the effective configuration
  Show,
}

#[derive(Subcommand)]
enum Commands {
  /// Compare one application's manual and inferred annotations
  Compare {
    /// Application name used to locate files in the data layout
    #[arg(long, conflicts_with = "db")]
    app: Option<String>,

    /// Analysis database directory; its name is the application name
    #[arg(long, value_name = "DIR")]
    db: Option<PathBuf>,

    /// Manual annotations file (overrides the layout)
    #[arg(long, value_name = "FILE")]
    manual: Option<PathBuf>,

    /// Inferred annotations file (overrides the layout)
    #[arg(long, value_name = "FILE")]
    inferred: Option<PathBuf>,

    /// Field mutability facts file (overrides the layout)
    #[arg(long, value_name = "FILE")]
    field_info: Option<PathBuf>,

    /// Summary output file (default: layout output path when an app is known)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the full JSON report instead of the summary line
    #[arg(long)]
    json: bool,

    /// Log the matched annotations per category
    #[arg(long)]
    show_matches: bool,
  },

  /// List the annotation categories and their keyword rules
  Categories {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// Manage configuration
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_cli_logging(cli.verbose);

  match cli.command {
    Commands::Compare {
      app,
      db,
      manual,
      inferred,
      field_info,
      output,
      json,
      show_matches,
    } => cmd_compare(
      CompareArgs {
        app,
        db,
        manual,
        inferred,
        field_info,
        output,
        json,
        show_matches,
      },
      cli.config.as_deref(),
    ),
    Commands::Categories { json } => cmd_categories(json, cli.config.as_deref()),
    Commands::Config { command } => match command {
      ConfigCommand::Init { force } => cmd_config_init(force),
      ConfigCommand::Show => cmd_config_show(cli.config.as_deref()),
    },
  }
}
