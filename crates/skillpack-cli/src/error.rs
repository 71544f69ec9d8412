//! CLI error type

use skillpack_core::{PackageError, ValidationError};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Package(#[from] PackageError),
}
