//! Interactive collection of environment variable values

use dialoguer::{Input, theme::ColorfulTheme};
use skillpack_core::collector::{EnvLookup, process_env};
use skillpack_core::{EnvCollector, PackageError, mask_value, resolve_value};
use std::collections::BTreeMap;

/// Reads one answer for the given prompt text
pub type PromptReader = Box<dyn FnMut(&str) -> Result<String, PackageError>>;

/// Reads answers from the terminal with dialoguer.
pub fn terminal_reader() -> PromptReader {
    let theme = ColorfulTheme::default();
    Box::new(move |prompt: &str| {
        Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PackageError::Prompt(e.to_string()))
    })
}

/// Prompts for each variable in turn, showing a masked hint of its current value.
pub struct TerminalCollector {
    lookup: EnvLookup,
    reader: PromptReader,
}

impl TerminalCollector {
    pub fn new() -> Self {
        Self::with_parts(process_env(), terminal_reader())
    }

    pub fn with_parts(lookup: EnvLookup, reader: PromptReader) -> Self {
        Self { lookup, reader }
    }
}

impl Default for TerminalCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCollector for TerminalCollector {
    fn collect(&mut self, vars: &[String]) -> Result<BTreeMap<String, String>, PackageError> {
        let mut values = BTreeMap::new();
        if vars.is_empty() {
            return Ok(values);
        }

        println!("  Press Enter to use the current environment value (shown in brackets).\n");

        for name in vars {
            let current = (self.lookup)(name);
            let prompt = format!("{} {}", name, mask_value(current.as_deref()));
            let answer = (self.reader)(&prompt)?;
            values.insert(name.clone(), resolve_value(&answer, current.as_deref()));
        }

        Ok(values)
    }
}
