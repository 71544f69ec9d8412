//! Archive backends producing the `.skill` artifact
//!
//! Both backends root every entry at the skill folder's own name, so
//! `skills/my-skill/SKILL.md` is stored as `my-skill/SKILL.md`.

use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Exit status and diagnostic output of an archive run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveStatus {
    pub success: bool,
    pub diagnostics: String,
}

impl ArchiveStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            diagnostics: String::new(),
        }
    }

    pub fn failed(diagnostics: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Compresses a skill folder into a single archive file.
pub trait Archiver {
    /// Archive `source_dir` (recursively) into `destination`.
    fn archive(&self, source_dir: &Path, destination: &Path) -> ArchiveStatus;
}

impl<T: Archiver + ?Sized> Archiver for Box<T> {
    fn archive(&self, source_dir: &Path, destination: &Path) -> ArchiveStatus {
        (**self).archive(source_dir, destination)
    }
}

fn split_folder(source_dir: &Path) -> Option<(&Path, &OsStr)> {
    Some((source_dir.parent()?, source_dir.file_name()?))
}

/// Runs the system `zip` tool from the folder's parent directory.
#[derive(Debug, Clone)]
pub struct ZipCommand {
    program: OsString,
}

impl ZipCommand {
    pub const DEFAULT_PROGRAM: &'static str = "zip";

    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ZipCommand {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl Archiver for ZipCommand {
    fn archive(&self, source_dir: &Path, destination: &Path) -> ArchiveStatus {
        let Some((parent, name)) = split_folder(source_dir) else {
            return ArchiveStatus::failed(format!(
                "Cannot archive {}: path has no folder name",
                source_dir.display()
            ));
        };

        debug!(
            "Running {:?} -r {} {:?} in {}",
            self.program,
            destination.display(),
            name,
            parent.display()
        );

        let output = Command::new(&self.program)
            .arg("-r")
            .arg(destination)
            .arg(name)
            .current_dir(parent)
            .output();

        match output {
            Ok(out) => ArchiveStatus {
                success: out.status.success(),
                diagnostics: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            },
            Err(e) => ArchiveStatus::failed(format!(
                "Failed to run {}: {}",
                self.program.to_string_lossy(),
                e
            )),
        }
    }
}

/// Writes the archive in-process with the `zip` crate.
///
/// The archive is assembled in a sibling `.partial` file and renamed into
/// place once complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeZip;

impl Archiver for NativeZip {
    fn archive(&self, source_dir: &Path, destination: &Path) -> ArchiveStatus {
        let partial = partial_path(destination);
        match write_archive(source_dir, destination, &partial) {
            Ok(count) => {
                debug!("Wrote {} entries to {}", count, destination.display());
                ArchiveStatus::ok()
            }
            Err(e) => {
                let _ = fs::remove_file(&partial);
                ArchiveStatus::failed(e.to_string())
            }
        }
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn entry_name(root: &str, relative: &Path) -> String {
    let mut name = root.to_string();
    for component in relative.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

fn write_archive(
    source_dir: &Path,
    destination: &Path,
    partial: &Path,
) -> zip::result::ZipResult<usize> {
    let root = source_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Cannot archive {}: path has no folder name", source_dir.display()),
            )
        })?;

    let mut writer = ZipWriter::new(File::create(partial)?);
    let base = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut count = 0;

    for entry in WalkDir::new(source_dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if path == partial || path == destination {
            continue;
        }

        let relative = path.strip_prefix(source_dir).unwrap_or(path);
        let name = entry_name(&root, relative);

        #[allow(unused_mut)]
        let mut options = base.clone();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options = options.unix_permissions(fs::metadata(path)?.permissions().mode());
        }

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else if entry.file_type().is_file() {
            writer.start_file(name, options)?;
            io::copy(&mut File::open(path)?, &mut writer)?;
        } else {
            continue;
        }
        count += 1;
    }

    writer.finish()?;
    fs::rename(partial, destination)?;
    Ok(count)
}
