//! Console output for the packaging workflow

mod progress;

pub use progress::Spinner;

use crate::CliError;
use colored::Colorize;
use skillpack_core::{ArchiveStatus, PackageError, PackageReporter};
use std::path::Path;

/// Prints packaging progress to the terminal
#[derive(Default)]
pub struct ConsoleReporter {
    spinner: Option<Spinner>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PackageReporter for ConsoleReporter {
    fn validating(&mut self) {
        println!("{} Validating skill...", "→".green());
    }

    fn validated(&mut self, message: &str) {
        println!("{} {}\n", "✓".green(), message);
    }

    fn env_vars_detected(&mut self, vars: &[String]) {
        println!(
            "{} The following environment variables are required by this skill: {}",
            "→".green(),
            vars.join(", ").cyan()
        );
    }

    fn no_env_vars(&mut self) {
        println!(
            "{} No environment variables detected in skill scripts.\n",
            "•".bright_black()
        );
    }

    fn missing_values(&mut self, names: &[String]) {
        eprintln!(
            "\n{} No value provided for: {}",
            "!".yellow(),
            names.join(", ")
        );
        eprintln!("  These will be empty in the bundled .env file.\n");
    }

    fn bundling_env(&mut self) {
        println!("{} Bundling .env into skill archive...", "→".green());
    }

    fn archiving(&mut self, destination: &Path) {
        self.spinner = Some(Spinner::new(&format!(
            "Creating {}",
            destination.display()
        )));
    }

    fn archived(&mut self, _status: &ArchiveStatus) {
        self.spinner = None;
    }

    fn file_added(&mut self, relative: &Path) {
        println!("  {} Added: {}", "•".bright_black(), relative.display());
    }

    fn packaged(&mut self, archive: &Path) {
        println!(
            "\n{} Successfully packaged skill to: {}",
            "✓".green(),
            archive.display().to_string().cyan()
        );
    }
}

/// Print a packaging failure to stderr.
pub fn print_error(err: &CliError) {
    match err {
        CliError::Package(PackageError::ValidationFailed(e)) => {
            eprintln!("{} Validation failed: {}", "✗".red(), e);
            eprintln!("  Please fix the validation errors before packaging.");
        }
        CliError::Package(e @ PackageError::Archive(_)) => {
            eprintln!("{} {}", "✗".red(), e);
        }
        other => {
            eprintln!("{} Error: {}", "✗".red(), other);
        }
    }
}
