//! Packaging of a skill folder into a `.skill` archive

use crate::SKILL_FILE;
use crate::archiver::{ArchiveStatus, Archiver};
use crate::collector::EnvCollector;
use crate::envfile::{self, EnvFile};
use crate::error::PackageError;
use crate::scanner;
use crate::validator::validate_skill;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Extension of the generated archive
pub const ARCHIVE_EXTENSION: &str = "skill";

/// Progress notifications emitted while packaging.
///
/// Every method defaults to doing nothing.
pub trait PackageReporter {
    fn validating(&mut self) {}
    fn validated(&mut self, _message: &str) {}
    fn env_vars_detected(&mut self, _vars: &[String]) {}
    fn no_env_vars(&mut self) {}
    fn missing_values(&mut self, _names: &[String]) {}
    fn bundling_env(&mut self) {}
    fn archiving(&mut self, _destination: &Path) {}
    fn archived(&mut self, _status: &ArchiveStatus) {}
    fn file_added(&mut self, _relative: &Path) {}
    fn packaged(&mut self, _archive: &Path) {}
}

impl PackageReporter for () {}

/// Validates, scans, bundles and archives skill folders.
pub struct Packager {
    archiver: Box<dyn Archiver>,
    collector: Box<dyn EnvCollector>,
}

impl Packager {
    pub fn new(archiver: impl Archiver + 'static, collector: impl EnvCollector + 'static) -> Self {
        Self::from_boxed(Box::new(archiver), Box::new(collector))
    }

    pub fn from_boxed(archiver: Box<dyn Archiver>, collector: Box<dyn EnvCollector>) -> Self {
        Self {
            archiver,
            collector,
        }
    }

    /// Package `skill_dir` into `<output_dir>/<folder-name>.skill`.
    ///
    /// `output_dir` defaults to the current working directory and is created
    /// when missing. Returns the absolute path of the archive.
    pub fn package(
        &mut self,
        skill_dir: &Path,
        output_dir: Option<&Path>,
        reporter: &mut dyn PackageReporter,
    ) -> Result<PathBuf, PackageError> {
        let skill_dir = resolve_skill_dir(skill_dir)?;

        reporter.validating();
        let valid = validate_skill(&skill_dir).map_err(PackageError::ValidationFailed)?;
        reporter.validated(valid.message());

        let vars = scanner::scan_env_vars(&skill_dir);
        let env_file = if vars.is_empty() {
            reporter.no_env_vars();
            None
        } else {
            reporter.env_vars_detected(&vars);
            let values = self.collector.collect(&vars)?;

            let missing: Vec<String> = vars
                .iter()
                .filter(|name| values.get(*name).is_none_or(|v| v.is_empty()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                reporter.missing_values(&missing);
            }

            let file = EnvFile::write(&skill_dir, &envfile::render(&vars, &values))?;
            reporter.bundling_env();
            Some(file)
        };

        let output_dir = match output_dir {
            Some(dir) => std::path::absolute(dir)?,
            None => std::env::current_dir()?,
        };
        fs::create_dir_all(&output_dir)?;

        let folder_name = skill_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| PackageError::NotADirectory(skill_dir.clone()))?;
        let destination = output_dir.join(format!("{}.{}", folder_name, ARCHIVE_EXTENSION));
        let files = scanner::list_files(&skill_dir);

        info!("Archiving {} into {}", skill_dir.display(), destination.display());
        reporter.archiving(&destination);
        let status = self.archiver.archive(&skill_dir, &destination);
        reporter.archived(&status);

        if let Some(file) = env_file {
            file.remove();
        }

        if !status.success {
            return Err(PackageError::Archive(status.diagnostics));
        }

        let parent = skill_dir.parent().unwrap_or(skill_dir.as_path());
        for file in &files {
            reporter.file_added(file.strip_prefix(parent).unwrap_or(file.as_path()));
        }

        debug!("Packaged {} files", files.len());
        reporter.packaged(&destination);
        Ok(destination)
    }
}

fn resolve_skill_dir(skill_dir: &Path) -> Result<PathBuf, PackageError> {
    let absolute = normalize(skill_dir)?;

    if !absolute.exists() {
        return Err(PackageError::NotFound(absolute));
    }
    if !absolute.is_dir() {
        return Err(PackageError::NotADirectory(absolute));
    }
    if !absolute.join(SKILL_FILE).exists() {
        return Err(PackageError::MissingMetadata(absolute));
    }

    Ok(absolute)
}

/// Absolute form of `path` with `.` and `..` folded lexically.
///
/// Symlinks are kept so the archive is named after the folder as given.
/// An empty path is the current directory.
fn normalize(path: &Path) -> Result<PathBuf, PackageError> {
    let absolute = if path.as_os_str().is_empty() {
        std::env::current_dir()?
    } else {
        std::path::absolute(path)?
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
