//! CLI definitions using clap

use clap::builder::BoolishValueParser;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Validate the SKILL.md frontmatter of a skill folder
#[derive(Parser, Debug)]
#[command(name = "skill-validate")]
#[command(author, version, about, long_about = None)]
pub struct ValidateCli {
    /// Skill folder containing SKILL.md
    pub skill_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Package a skill folder into a distributable .skill archive
#[derive(Parser, Debug)]
#[command(name = "skill-package")]
#[command(author, version, about, long_about = None)]
pub struct PackageCli {
    /// Skill folder to package
    pub skill_dir: PathBuf,

    /// Directory receiving the archive (defaults to the current directory)
    pub output_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Never prompt; bundle the current environment values
    #[arg(long, env = "SKILLPACK_NO_INPUT", value_parser = BoolishValueParser::new())]
    pub no_input: bool,

    /// Archive backend
    #[arg(long, value_enum, default_value_t = ArchiverKind::Zip, env = "SKILLPACK_ARCHIVER")]
    pub archiver: ArchiverKind,

    /// zip executable used by the `zip` backend
    #[arg(long, default_value = "zip", env = "SKILLPACK_ZIP")]
    pub zip_program: PathBuf,
}

/// Available archive backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ArchiverKind {
    /// Run the system `zip` tool
    #[default]
    Zip,
    /// Write the archive in-process
    Native,
}

impl std::fmt::Display for ArchiverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zip => write!(f, "zip"),
            Self::Native => write!(f, "native"),
        }
    }
}

/// Parse the command line, exiting with status 1 on usage errors.
///
/// `--help` and `--version` still exit successfully.
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}
