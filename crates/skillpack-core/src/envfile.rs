//! Temporary `.env` file bundled into the archive

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ENV_FILE_NAME: &str = ".env";

/// Render one `KEY=VALUE` line per variable, in the order given, with a final newline.
pub fn render(vars: &[String], values: &BTreeMap<String, String>) -> String {
    let mut content = vars
        .iter()
        .map(|name| {
            let value = values.get(name).map(String::as_str).unwrap_or_default();
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join("\n");
    content.push('\n');
    content
}

/// A `.env` file that lives only for the duration of a packaging run.
///
/// The file is removed by [`EnvFile::remove`] or, failing that, on drop.
#[derive(Debug)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    /// Write `content` to `<dir>/.env`, readable and writable by the owner only.
    pub fn write(dir: &Path, content: &str) -> std::io::Result<Self> {
        let path = dir.join(ENV_FILE_NAME);
        if path.exists() {
            warn!("Overwriting existing {}", path.display());
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&path)?;
        // mode() only applies on creation
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(content.as_bytes())?;

        debug!("Wrote {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort removal; errors are logged and ignored.
    pub fn remove(&self) {
        if !self.path.exists() {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed {}", self.path.display()),
            Err(e) => debug!("Could not remove {}: {}", self.path.display(), e),
        }
    }
}

impl Drop for EnvFile {
    fn drop(&mut self) {
        self.remove();
    }
}
