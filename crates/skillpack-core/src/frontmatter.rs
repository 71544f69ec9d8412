//! SKILL.md frontmatter extraction and decoding

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::{Mapping, Value};

/// Opening marker of the frontmatter block
pub const DELIMITER: &str = "---";

static FRONTMATTER: Lazy<Regex> = Lazy::new(|| {
    // [\s\S]*? so the lazy block spans newlines
    Regex::new(r"^---\r?\n([\s\S]*?)\r?\n---").expect("valid frontmatter regex")
});

/// Return the raw YAML between the opening and closing `---` markers.
pub fn extract(content: &str) -> Result<&str, ValidationError> {
    if !content.starts_with(DELIMITER) {
        return Err(ValidationError::Format(
            "No YAML frontmatter found".to_string(),
        ));
    }

    FRONTMATTER
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|block| block.as_str())
        .ok_or_else(|| ValidationError::Format("Invalid frontmatter format".to_string()))
}

/// Decode a frontmatter block into a YAML mapping.
pub fn parse(block: &str) -> Result<Mapping, ValidationError> {
    let value: Value = serde_yaml::from_str(block)
        .map_err(|e| ValidationError::Parse(format!("Invalid YAML in frontmatter: {}", e)))?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(ValidationError::Parse(
            "Frontmatter must be a YAML dictionary".to_string(),
        )),
    }
}

/// Human-readable name of a YAML value's type, used in type mismatch messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
