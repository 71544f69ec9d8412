//! Skillpack CLI - validate skill folders and package them into `.skill` archives
//!
//! Shared plumbing for the `skill-validate` and `skill-package` binaries.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod prompt;

pub use error::CliError;

use tracing_subscriber::EnvFilter;

/// Initialize logging on stderr.
///
/// `RUST_LOG` takes precedence; otherwise `debug` when verbose and `warn` by default.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
