//! Error taxonomy for validation and packaging

use std::path::PathBuf;

/// Category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    NotFound,
    Format,
    Parse,
    MissingField,
    TypeMismatch,
    Constraint,
}

/// Why a skill folder failed validation.
///
/// The `Display` output is the exact diagnostic shown to the user.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("SKILL.md not found")]
    NotFound,

    #[error("{0}")]
    Format(String),

    #[error("{0}")]
    Parse(String),

    #[error("Missing '{0}' in frontmatter")]
    MissingField(&'static str),

    #[error("{field} must be a string, got {actual}")]
    TypeMismatch {
        field: &'static str,
        actual: &'static str,
    },

    #[error("{0}")]
    Constraint(String),
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::NotFound => ValidationErrorKind::NotFound,
            Self::Format(_) => ValidationErrorKind::Format,
            Self::Parse(_) => ValidationErrorKind::Parse,
            Self::MissingField(_) => ValidationErrorKind::MissingField,
            Self::TypeMismatch { .. } => ValidationErrorKind::TypeMismatch,
            Self::Constraint(_) => ValidationErrorKind::Constraint,
        }
    }
}

/// Failure of a packaging run
#[derive(thiserror::Error, Debug)]
pub enum PackageError {
    #[error("Skill folder not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("SKILL.md not found in {}", .0.display())]
    MissingMetadata(PathBuf),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[source] ValidationError),

    #[error("Error creating .skill file: {0}")]
    Archive(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
