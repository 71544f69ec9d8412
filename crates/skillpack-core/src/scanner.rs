//! Environment variable discovery in skill scripts
//!
//! Only lines inside a configuration section are inspected. A section opens
//! with a banner such as
//!
//! ```text
//! # ─── Configuration ───
//! ```
//!
//! and closes with a comment made of ten or more `─` characters. Inside a
//! section, `VAR="${ENV_NAME}"` and `VAR="${ENV_NAME:-default}"` contribute
//! `ENV_NAME`; a bare `NAME=...` assignment contributes `NAME`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extensions treated as shell scripts; `""` stands for files without one.
pub const SCRIPT_EXTENSIONS: [&str; 4] = ["sh", "bash", "zsh", ""];

static SECTION_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#\s*─+\s*Configuration\s*─+").expect("valid section start regex")
});

static SECTION_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s*─{10,}\s*$").expect("valid section end regex"));

static ENV_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"=["']?\$\{([A-Z_][A-Z0-9_]*)[^}]*\}"#).expect("valid env reference regex")
});

static BARE_ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z_][A-Z0-9_]*)=").expect("valid assignment regex"));

/// Every regular file under `dir`, sorted by path.
pub fn list_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect()
}

/// Whether `path` is scanned as a shell script.
///
/// Names ending in a bare `.` are never scripts.
pub fn is_script(path: &Path) -> bool {
    if path
        .file_name()
        .is_some_and(|n| n.to_string_lossy().ends_with('.'))
    {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    SCRIPT_EXTENSIONS.contains(&ext.as_str())
}

/// Collect the environment variables configured by the scripts under `skill_dir`.
///
/// Files that cannot be read as UTF-8 text are skipped.
pub fn scan_env_vars(skill_dir: &Path) -> Vec<String> {
    let mut vars = BTreeSet::new();

    for file in list_files(skill_dir).iter().filter(|f| is_script(f)) {
        match fs::read_to_string(file) {
            Ok(content) => scan_content(&content, &mut vars),
            Err(e) => debug!("Skipping {}: {}", file.display(), e),
        }
    }

    vars.into_iter().collect()
}

/// Add the variables configured in one script's text to `vars`.
pub fn scan_content(content: &str, vars: &mut BTreeSet<String>) {
    let mut in_section = false;

    for line in content.lines() {
        if !in_section {
            in_section = SECTION_START.is_match(line);
            continue;
        }
        if SECTION_END.is_match(line) {
            in_section = false;
            continue;
        }

        let name = ENV_REFERENCE
            .captures(line)
            .or_else(|| BARE_ASSIGNMENT.captures(line))
            .and_then(|caps| caps.get(1));
        if let Some(name) = name {
            vars.insert(name.as_str().to_string());
        }
    }
}
