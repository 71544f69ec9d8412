//! SKILL.md validation
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. `SKILL.md` exists in the skill folder
//! 2. The file starts with a `---` delimited frontmatter block
//! 3. The block is a YAML mapping using only the allowed top-level keys
//! 4. `name` and `description` are present
//! 5. `name` is a kebab-case string of at most 64 characters
//! 6. `description` is a string of at most 1024 characters without `<` or `>`
//! 7. `compatibility`, when set, is a string of at most 500 characters

use crate::SKILL_FILE;
use crate::error::ValidationError;
use crate::frontmatter;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Top-level keys accepted in the frontmatter
pub const ALLOWED_PROPERTIES: [&str; 6] = [
    "name",
    "description",
    "license",
    "allowed-tools",
    "metadata",
    "compatibility",
];

pub const MAX_NAME_LENGTH: usize = 64;
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;
pub const MAX_COMPATIBILITY_LENGTH: usize = 500;

/// Message reported for a skill that passes every check
pub const VALID_MESSAGE: &str = "Skill is valid!";

static KEBAB_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid kebab-case regex"));

/// Typed view of a validated frontmatter block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub license: Option<Value>,
    #[serde(default, rename = "allowed-tools")]
    pub allowed_tools: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub compatibility: Option<String>,
}

/// A skill folder that passed validation
#[derive(Debug, Clone)]
pub struct ValidSkill {
    pub metadata: SkillMetadata,
}

impl ValidSkill {
    pub fn message(&self) -> &'static str {
        VALID_MESSAGE
    }
}

/// Validate the `SKILL.md` inside `skill_dir`.
pub fn validate_skill(skill_dir: impl AsRef<Path>) -> Result<ValidSkill, ValidationError> {
    let skill_md = skill_dir.as_ref().join(SKILL_FILE);
    if !skill_md.is_file() {
        return Err(ValidationError::NotFound);
    }

    let content = fs::read_to_string(&skill_md)
        .map_err(|e| ValidationError::Parse(format!("Failed to read {}: {}", SKILL_FILE, e)))?;

    validate_content(&content)
}

/// Validate the text of a `SKILL.md` document.
pub fn validate_content(content: &str) -> Result<ValidSkill, ValidationError> {
    let block = frontmatter::extract(content)?;
    debug!("Frontmatter block:\n{}", block);

    let mapping = frontmatter::parse(block)?;
    check_keys(&mapping)?;

    let name = required(&mapping, "name")?;
    let description = required(&mapping, "description")?;

    check_name(expect_string(name, "Name")?)?;
    check_description(expect_string(description, "Description")?)?;

    if let Some(compatibility) = mapping.get("compatibility") {
        check_compatibility(compatibility)?;
    }

    let metadata: SkillMetadata = serde_yaml::from_value(Value::Mapping(mapping))
        .map_err(|e| ValidationError::Parse(format!("Invalid YAML in frontmatter: {}", e)))?;

    Ok(ValidSkill { metadata })
}

fn check_keys(mapping: &Mapping) -> Result<(), ValidationError> {
    let mut unexpected: Vec<String> = mapping
        .keys()
        .map(key_to_string)
        .filter(|key| !ALLOWED_PROPERTIES.contains(&key.as_str()))
        .collect();

    if unexpected.is_empty() {
        return Ok(());
    }

    unexpected.sort();
    let mut allowed = ALLOWED_PROPERTIES.to_vec();
    allowed.sort_unstable();

    Err(ValidationError::Parse(format!(
        "Unexpected key(s) in SKILL.md frontmatter: {}. Allowed properties are: {}",
        unexpected.join(", "),
        allowed.join(", ")
    )))
}

fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn required<'a>(mapping: &'a Mapping, field: &'static str) -> Result<&'a Value, ValidationError> {
    mapping
        .get(field)
        .ok_or(ValidationError::MissingField(field))
}

fn expect_string<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or_else(|| ValidationError::TypeMismatch {
        field,
        actual: frontmatter::type_name(value),
    })
}

fn check_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(());
    }

    if !KEBAB_CASE.is_match(name) {
        return Err(ValidationError::Constraint(format!(
            "Name '{}' should be kebab-case (lowercase letters, digits, and hyphens only)",
            name
        )));
    }
    if name.starts_with('-') || name.ends_with('-') || name.contains("--") {
        return Err(ValidationError::Constraint(format!(
            "Name '{}' cannot start/end with hyphen or contain consecutive hyphens",
            name
        )));
    }

    let len = name.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(ValidationError::Constraint(format!(
            "Name is too long ({} characters). Maximum is {} characters.",
            len, MAX_NAME_LENGTH
        )));
    }

    Ok(())
}

fn check_description(description: &str) -> Result<(), ValidationError> {
    let description = description.trim();
    if description.is_empty() {
        return Ok(());
    }

    if description.contains(['<', '>']) {
        return Err(ValidationError::Constraint(
            "Description cannot contain angle brackets (< or >)".to_string(),
        ));
    }

    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::Constraint(format!(
            "Description is too long ({} characters). Maximum is {} characters.",
            len, MAX_DESCRIPTION_LENGTH
        )));
    }

    Ok(())
}

fn check_compatibility(value: &Value) -> Result<(), ValidationError> {
    // null and "" count as unset
    if value.is_null() || value.as_str() == Some("") {
        return Ok(());
    }

    let compatibility = expect_string(value, "Compatibility")?;
    let len = compatibility.chars().count();
    if len > MAX_COMPATIBILITY_LENGTH {
        return Err(ValidationError::Constraint(format!(
            "Compatibility is too long ({} characters). Maximum is {} characters.",
            len, MAX_COMPATIBILITY_LENGTH
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use tempfile::TempDir;

    fn doc(frontmatter: &str) -> String {
        format!("---\n{}\n---\n\n# Skill\n\nBody text.\n", frontmatter)
    }

    fn message(frontmatter: &str) -> String {
        validate_content(&doc(frontmatter)).unwrap_err().to_string()
    }

    #[test]
    fn test_minimal_skill_is_valid() {
        let skill = validate_content(&doc("name: my-skill\ndescription: \"Does a thing\"")).unwrap();
        assert_eq!(skill.message(), "Skill is valid!");
        assert_eq!(skill.metadata.name, "my-skill");
        assert_eq!(skill.metadata.description, "Does a thing");
    }

    #[test]
    fn test_all_allowed_keys_accepted() {
        let skill = validate_content(&doc(
            "name: pdf-tools\n\
             description: Work with PDF files\n\
             license: MIT\n\
             allowed-tools: [Bash, Read]\n\
             metadata:\n  author: someone\n\
             compatibility: Requires poppler",
        ))
        .unwrap();
        assert_eq!(skill.metadata.compatibility.as_deref(), Some("Requires poppler"));
        assert!(skill.metadata.allowed_tools.is_some());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = validate_skill(dir.path()).unwrap_err();
        assert_eq!(err, ValidationError::NotFound);
        assert_eq!(err.to_string(), "SKILL.md not found");
    }

    #[test]
    fn test_validate_skill_reads_folder() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SKILL_FILE),
            doc("name: my-skill\ndescription: Does a thing"),
        )
        .unwrap();

        let first = validate_skill(dir.path()).unwrap();
        let second = validate_skill(dir.path()).unwrap();
        assert_eq!(first.message(), second.message());
        assert_eq!(first.metadata.name, second.metadata.name);
    }

    #[test]
    fn test_unexpected_keys_listed_sorted() {
        assert_eq!(
            message("name: my-skill\ndescription: ok\nzeta: 1\nextra: true"),
            "Unexpected key(s) in SKILL.md frontmatter: extra, zeta. Allowed properties are: \
             allowed-tools, compatibility, description, license, metadata, name"
        );
    }

    #[test]
    fn test_unexpected_key_is_parse_error() {
        let err = validate_content(&doc("name: my-skill\ndescription: ok\nextra: true")).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::Parse);
        assert!(err.to_string().contains(": extra."));
    }

    #[test]
    fn test_missing_required_fields() {
        assert_eq!(message("description: ok"), "Missing 'name' in frontmatter");
        assert_eq!(message("name: my-skill"), "Missing 'description' in frontmatter");
    }

    #[test]
    fn test_name_type_mismatch() {
        assert_eq!(message("name: 42\ndescription: ok"), "Name must be a string, got number");
        assert_eq!(message("name:\ndescription: ok"), "Name must be a string, got null");
        assert_eq!(
            message("name: my-skill\ndescription: [a, b]"),
            "Description must be a string, got sequence"
        );
    }

    #[test]
    fn test_name_not_kebab_case() {
        assert_eq!(
            message("name: My_Skill\ndescription: ok"),
            "Name 'My_Skill' should be kebab-case (lowercase letters, digits, and hyphens only)"
        );
    }

    #[test]
    fn test_name_hyphen_rules() {
        let expected = |n: &str| {
            format!("Name '{}' cannot start/end with hyphen or contain consecutive hyphens", n)
        };
        assert_eq!(message("name: -skill\ndescription: ok"), expected("-skill"));
        assert_eq!(message("name: skill-\ndescription: ok"), expected("skill-"));
        assert_eq!(message("name: my--skill\ndescription: ok"), expected("my--skill"));
    }

    #[test]
    fn test_name_length_limit() {
        let ok = "a".repeat(64);
        assert!(validate_content(&doc(&format!("name: {}\ndescription: ok", ok))).is_ok());

        let long = "a".repeat(65);
        assert_eq!(
            message(&format!("name: {}\ndescription: ok", long)),
            "Name is too long (65 characters). Maximum is 64 characters."
        );
    }

    #[test]
    fn test_name_is_trimmed_and_blank_allowed() {
        assert!(validate_content(&doc("name: \"  my-skill  \"\ndescription: ok")).is_ok());
        assert!(validate_content(&doc("name: \"\"\ndescription: ok")).is_ok());
    }

    #[test]
    fn test_description_rules() {
        assert_eq!(
            message("name: my-skill\ndescription: Use <b>bold</b>"),
            "Description cannot contain angle brackets (< or >)"
        );

        let long = "d".repeat(1025);
        assert_eq!(
            message(&format!("name: my-skill\ndescription: {}", long)),
            "Description is too long (1025 characters). Maximum is 1024 characters."
        );
    }

    #[test]
    fn test_compatibility_rules() {
        assert!(validate_content(&doc("name: my-skill\ndescription: ok\ncompatibility:")).is_ok());
        assert!(validate_content(&doc("name: my-skill\ndescription: ok\ncompatibility: \"\"")).is_ok());
        assert_eq!(
            message("name: my-skill\ndescription: ok\ncompatibility: 3"),
            "Compatibility must be a string, got number"
        );

        let long = "c".repeat(501);
        assert_eq!(
            message(&format!("name: my-skill\ndescription: ok\ncompatibility: {}", long)),
            "Compatibility is too long (501 characters). Maximum is 500 characters."
        );
    }

    #[test]
    fn test_format_checked_before_parse() {
        let err = validate_content("name: my-skill\ndescription: ok\n").unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::Format);

        let err = validate_content("---\nname: [\n").unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::Format);
    }
}
