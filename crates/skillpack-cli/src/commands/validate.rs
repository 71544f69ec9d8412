//! `skill-validate` command implementation

use crate::CliError;
use skillpack_core::validate_skill;
use std::path::Path;
use tracing::debug;

/// Validate the skill folder, returning the confirmation message.
pub fn run(skill_dir: &Path) -> Result<&'static str, CliError> {
    debug!("Validating {}", skill_dir.display());
    let skill = validate_skill(skill_dir)?;
    Ok(skill.message())
}
