//! Resolution of environment variable values before they are bundled

use crate::error::PackageError;
use std::collections::BTreeMap;

/// Source of the values written to the bundled `.env` file
pub trait EnvCollector {
    /// Resolve a value for every name in `vars`, in order.
    fn collect(&mut self, vars: &[String]) -> Result<BTreeMap<String, String>, PackageError>;
}

/// Lookup of a variable's current value
pub type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

/// Reads variables from the current process environment
pub fn process_env() -> EnvLookup {
    Box::new(|name: &str| std::env::var(name).ok())
}

/// Masked hint for a current value: the first four characters followed by
/// up to eight asterisks, or `not set`.
pub fn mask_value(current: Option<&str>) -> String {
    match current.filter(|v| !v.is_empty()) {
        Some(value) => {
            let visible: String = value.chars().take(4).collect();
            let hidden = value.chars().count().saturating_sub(4).min(8);
            format!("[{}{}]", visible, "*".repeat(hidden))
        }
        None => "[not set]".to_string(),
    }
}

/// An empty answer falls back to the current value, then to the empty string.
pub fn resolve_value(answer: &str, current: Option<&str>) -> String {
    let answer = answer.trim();
    if !answer.is_empty() {
        return answer.to_string();
    }
    current.unwrap_or_default().to_string()
}

/// Non-interactive collector that keeps the current environment values
pub struct EnvironmentCollector {
    lookup: EnvLookup,
}

impl EnvironmentCollector {
    pub fn new() -> Self {
        Self::with_lookup(process_env())
    }

    pub fn with_lookup(lookup: EnvLookup) -> Self {
        Self { lookup }
    }
}

impl Default for EnvironmentCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCollector for EnvironmentCollector {
    fn collect(&mut self, vars: &[String]) -> Result<BTreeMap<String, String>, PackageError> {
        Ok(vars
            .iter()
            .map(|name| {
                let current = (self.lookup)(name);
                (name.clone(), resolve_value("", current.as_deref()))
            })
            .collect())
    }
}
