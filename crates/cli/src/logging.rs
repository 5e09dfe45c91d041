//! Logging setup for CLI commands

use tracing_subscriber::EnvFilter;

/// Initialize console logging on stderr; stdout carries only results.
///
/// `RUST_LOG` overrides the default level.
pub fn init_cli_logging(verbose: bool) {
  let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}
